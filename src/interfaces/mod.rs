// Interfaces exposed by optional adapters.
//
// Each submodule should be feature-gated by the capability it implements.
#[cfg(feature = "http-server")]
pub mod http;

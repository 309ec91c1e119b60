/// Set of functions used throughout to assure the correctness of the depot state.
pub mod assertions;

mod config;

#[doc(inline)]
pub use config::LifecycleConfig;
#[doc(inline)]
pub use config::OrderIdScheme;
#[doc(inline)]
pub use config::RouterConfig;

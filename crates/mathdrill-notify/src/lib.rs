//! mathdrill-notify — results delivery sinks.
//!
//! Implements the `NotificationSink` trait for the remote results endpoint
//! (which emails the summary to a fixed recipient list) and for a local
//! renderer that writes a shareable results page, plus a mock sink for
//! tests. Also owns configuration loading.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod page;

pub use config::{create_sinks, load_config, load_config_from, MathdrillConfig, NotifyConfig};
pub use error::SinkError;
pub use http::HttpSink;
pub use mock::MockSink;
pub use page::PageSink;

//! Terminal counterpart of the page served at `/`: submits a topic to the
//! proxy and renders the returned lists.

pub mod busy;
pub mod reconstruct;
pub mod render;
pub mod requester;

pub use busy::{BusyGuard, BusyIndicator, NoopBusy};
pub use reconstruct::StreamAccumulator;
pub use render::{RenderError, ResultsView};
pub use requester::{AnalysisRequester, RequestError, FAILURE_NOTICE};

//! Dashboard domain: payload schemas, chart model, widget catalogue, page state

pub mod chart;
pub mod page;
pub mod payload;
pub mod widget;

pub use chart::{ChartHandle, ChartType, RenderedChart};
pub use page::{cycle_chart, CycleError, PageState, WidgetStatus};
pub use payload::{ChartPayload, CountPayload, CountValue, PayloadError, Series, COUNT_REGIONS};
pub use widget::{Page, WidgetId, WidgetKind};

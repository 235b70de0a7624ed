//! Export core: pure widget state machine, form handling and view-model helpers.
mod effect;
mod form;
mod i18n;
mod msg;
mod options;
mod presenter;
mod queue;
mod registry;
mod request;
mod state;
mod topics;
mod update;
mod view_model;

pub use effect::{Effect, RpcMethod};
pub use form::{serialize_form, validate, FormField, FormSnapshot, ValidationFailure};
pub use i18n::Catalog;
pub use msg::{Msg, RpcFailure, RpcReply};
pub use options::{WidgetKind, WidgetOptions};
pub use presenter::{Banner, MessageKind, MessagePresenter};
pub use queue::{Dispatch, ExportQueue};
pub use registry::{ElementId, WidgetRegistry};
pub use request::{ExportRequest, TOPIC_FIELD};
pub use state::{Phase, WidgetState};
pub use topics::split_topics;
pub use update::update;
pub use view_model::{ProgressView, WidgetViewModel};

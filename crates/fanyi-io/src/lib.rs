pub mod clipboard;
pub mod external;

pub use external::{
    CallHandler, CallResponse, ExternalCallAction, ExternalCallService, ListenerError,
};

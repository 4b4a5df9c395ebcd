//! Handler implementations: logging, stateless commands, and the report conversation.

mod command_handler;
mod logging_handler;
mod report_flow_handler;

pub use command_handler::CommandHandler;
pub use logging_handler::LoggingHandler;
pub use report_flow_handler::ReportFlowHandler;

//! HLE Service Framework
//!
//! This crate provides the platform-agnostic object model for host-implemented
//! system services:
//!
//! - **ServiceFramework trait**: The interface every service object implements
//! - **CommandTable**: Per-interface mapping from command id to handler
//! - **SessionTable**: Handle registry routing requests to session objects
//! - **ServiceManager**: Named ports that open new sessions
//!
//! # Request Flow
//!
//! ```text
//!   raw bytes ──► SessionTable::process(handle, bytes)
//!                     │  Request::parse (faults stop here)
//!                     ▼
//!               ServiceFramework::handle_request
//!                     │  CommandTable::dispatch (unbound ids answer UNKNOWN_COMMAND_ID)
//!                     ▼
//!               handler(&mut service, &mut ctx) ──► Response
//!                     │  objects pushed with ctx.push_interface()
//!                     ▼
//!               registered in the SessionTable, handles appended to the response
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hle_framework::{CommandTable, FunctionInfo, HleRequestContext, ServiceFramework};
//! use hle_ipc::{ProtocolError, Response, ResponseBuilder};
//!
//! struct Echo;
//!
//! static ECHO_COMMANDS: CommandTable<Echo> = CommandTable::new(&[
//!     FunctionInfo::bound(0, "Ping", Echo::ping),
//!     FunctionInfo::unbound(1, "Pong"),
//! ]);
//!
//! impl Echo {
//!     fn ping(&mut self, _ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
//!         Ok(ResponseBuilder::success().build())
//!     }
//! }
//!
//! impl ServiceFramework for Echo {
//!     fn name(&self) -> &str { "Echo" }
//!     fn handle_request(&mut self, ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
//!         ECHO_COMMANDS.dispatch(self, ctx)
//!     }
//! }
//! ```

pub mod command;
pub mod error;
pub mod manager;
pub mod service;
pub mod session;

pub use command::{Command, CommandTable, FunctionInfo, Handler};
pub use error::ServiceError;
pub use manager::{ServiceFactory, ServiceManager};
pub use service::{HleRequestContext, ServiceFramework};
pub use session::{SessionHandle, SessionTable};

// Re-export the wire types handlers work with
pub use hle_ipc::{ProtocolError, Request, Response, ResponseBuilder, ResultCode};

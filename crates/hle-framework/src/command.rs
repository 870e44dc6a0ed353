//! Command tables.
//!
//! Every interface object owns a static table mapping command ids to
//! handlers. An entry is either `Bound` to a handler or `Unbound`: the id is
//! known (it has a name for logging) but nothing implements it yet. Unbound
//! and unknown ids both answer with `ResultCode::UNKNOWN_COMMAND_ID`, so a
//! guest always gets a deterministic failure instead of a hang.

use hle_ipc::{ProtocolError, Response, ResultCode};
use log::{error, trace};

use crate::service::{HleRequestContext, ServiceFramework};

/// Handler function for one command of service `S`.
pub type Handler<S> = fn(&mut S, &mut HleRequestContext<'_>) -> Result<Response, ProtocolError>;

/// What a command id resolves to.
pub enum Command<S> {
    /// Implemented
    Bound(Handler<S>),
    /// Recognized, not implemented
    Unbound,
}

impl<S> Clone for Command<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Command<S> {}

/// One row of a command table.
pub struct FunctionInfo<S> {
    /// Command id
    pub id: u32,
    /// Display name used in log lines
    pub name: &'static str,
    pub command: Command<S>,
}

impl<S> FunctionInfo<S> {
    pub const fn bound(id: u32, name: &'static str, handler: Handler<S>) -> Self {
        Self {
            id,
            name,
            command: Command::Bound(handler),
        }
    }

    pub const fn unbound(id: u32, name: &'static str) -> Self {
        Self {
            id,
            name,
            command: Command::Unbound,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.command, Command::Bound(_))
    }
}

/// Static command table for service `S`.
pub struct CommandTable<S: 'static> {
    functions: &'static [FunctionInfo<S>],
}

impl<S: 'static> CommandTable<S> {
    pub const fn new(functions: &'static [FunctionInfo<S>]) -> Self {
        Self { functions }
    }

    /// All rows, in declaration order.
    pub fn functions(&self) -> &'static [FunctionInfo<S>] {
        self.functions
    }

    pub fn lookup(&self, id: u32) -> Option<&'static FunctionInfo<S>> {
        self.functions.iter().find(|info| info.id == id)
    }
}

impl<S: ServiceFramework + 'static> CommandTable<S> {
    /// Route the request to its handler.
    ///
    /// Exactly one handler runs per call. Unbound and unknown ids are
    /// answered here without touching the service.
    pub fn dispatch(
        &self,
        service: &mut S,
        ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        let id = ctx.command_id();
        match self.lookup(id) {
            Some(FunctionInfo {
                name,
                command: Command::Bound(handler),
                ..
            }) => {
                trace!("{}: dispatching {} (cmd={})", service.name(), name, id);
                handler(service, ctx)
            }
            Some(info) => Ok(report_unimplemented(service.name(), Some(info.name), id)),
            None => Ok(report_unimplemented(service.name(), None, id)),
        }
    }
}

fn report_unimplemented(service: &str, function: Option<&str>, id: u32) -> Response {
    error!(
        "{}: unknown / unimplemented function '{}' (cmd={})",
        service,
        function.unwrap_or("<unknown>"),
        id
    );
    Response::from_result(ResultCode::UNKNOWN_COMMAND_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hle_ipc::{Request, ResponseBuilder};

    #[derive(Default)]
    struct Counter {
        calls: u32,
    }

    impl Counter {
        fn increment(&mut self, ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
            let by = ctx.reader().pop_u32()?;
            self.calls += by;
            Ok(ResponseBuilder::success().push_u32(self.calls).build())
        }
    }

    static COUNTER_COMMANDS: CommandTable<Counter> = CommandTable::new(&[
        FunctionInfo::bound(0, "Increment", Counter::increment),
        FunctionInfo::unbound(1, "Reset"),
    ]);

    impl ServiceFramework for Counter {
        fn name(&self) -> &str {
            "Counter"
        }

        fn handle_request(
            &mut self,
            ctx: &mut HleRequestContext<'_>,
        ) -> Result<Response, ProtocolError> {
            COUNTER_COMMANDS.dispatch(self, ctx)
        }
    }

    fn call(counter: &mut Counter, request: Request) -> Result<Response, ProtocolError> {
        let mut ctx = HleRequestContext::new(&request);
        counter.handle_request(&mut ctx)
    }

    #[test]
    fn test_bound_command_runs_handler() {
        let mut counter = Counter::default();
        let response = call(&mut counter, Request::new(0, Vec::new()).arg_u32(3)).unwrap();

        assert!(response.is_success());
        assert_eq!(response.reader().pop_u32().unwrap(), 3);
        assert_eq!(counter.calls, 3);
    }

    #[test]
    fn test_unbound_command_is_unimplemented() {
        let mut counter = Counter::default();
        let response = call(&mut counter, Request::new(1, Vec::new())).unwrap();

        assert_eq!(response.result, ResultCode::UNKNOWN_COMMAND_ID);
        assert!(response.data.is_empty());
        assert_eq!(counter.calls, 0);
    }

    #[test]
    fn test_unknown_command_matches_unbound() {
        let mut counter = Counter::default();
        let unknown = call(&mut counter, Request::new(999, Vec::new())).unwrap();
        let unbound = call(&mut counter, Request::new(1, Vec::new())).unwrap();

        assert_eq!(unknown, unbound);
    }

    #[test]
    fn test_missing_argument_is_protocol_error() {
        let mut counter = Counter::default();
        let err = call(&mut counter, Request::new(0, Vec::new())).unwrap_err();

        assert!(matches!(err, ProtocolError::TooShort { .. }));
        assert_eq!(counter.calls, 0);
    }

    #[test]
    fn test_lookup_and_bound_flags() {
        assert!(COUNTER_COMMANDS.lookup(0).unwrap().is_bound());
        assert!(!COUNTER_COMMANDS.lookup(1).unwrap().is_bound());
        assert!(COUNTER_COMMANDS.lookup(2).is_none());
        assert_eq!(COUNTER_COMMANDS.functions().len(), 2);
    }
}

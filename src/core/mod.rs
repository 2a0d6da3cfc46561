pub mod capabilities;
pub mod event_bus;
pub mod execution_context;
pub mod executor;
pub mod http_client;
pub mod runtime_context;

pub use capabilities::{ChainClient, ContractCall, HttpRequest, HttpTransport, TransferRequest};
pub use event_bus::{create_event_channel, EventReceiver, EventSender, FlowEvent};
pub use execution_context::ExecutionContext;
pub use executor::{ExecutionCheckpoint, ExecutorConfig, FlowExecutor, FlowExecutorBuilder};
pub use http_client::{HttpPoolConfig, ReqwestTransport};
pub use runtime_context::{
    FakeIdGenerator, FakeTimeProvider, IdGenerator, RealIdGenerator, RealTimeProvider,
    RuntimeContext, TimeProvider,
};

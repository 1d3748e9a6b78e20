mod gitkit_rpc;
mod response;
mod rpc_gateway;

pub use gitkit_rpc::GitkitRpc;
pub use response::check_gitkit_error;
pub use rpc_gateway::RpcGateway;

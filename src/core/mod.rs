pub mod fields;
pub mod handler;
pub mod pricing;
pub mod response;
pub mod validator;

pub use crate::domain::model::{
    GatewayRequest, GatewayResponse, LookupRequest, PlotFields, PlotResult, UpstreamRequest,
};
pub use crate::domain::ports::{PlotSource, UpstreamClient};
pub use crate::utils::error::Result;

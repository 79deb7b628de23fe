// Provider clients and the SSE decoding they share

pub mod openai;
pub mod provider_base;
pub mod provider_handle;
pub mod sse;

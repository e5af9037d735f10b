/*! Remote annotation

The [Annotate] trait is the seam between the batch pipeline and the remote service.
[ChatClient] implements it against an OpenAI-compatible chat completion API (DeepSeek by default).
!*/
mod annotate;
mod chat;
mod task;

pub use annotate::Annotate;
pub use chat::{ChatClient, ChatClientBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use task::Task;

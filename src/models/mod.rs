mod proxy;
mod slack;

pub use proxy::{ProxyRequest, ProxyResponse};
pub use slack::SlackMessage;

//! `LambdaApi` backed by the AWS SDK.

mod classify;
pub mod client;

pub use client::AwsLambdaClient;

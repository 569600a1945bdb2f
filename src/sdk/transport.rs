//! Transport abstraction between the services and the wire.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Executes a named API action.
///
/// Implementations attach credentials, serialize the payload and classify
/// failures. On success they return the envelope's `Value` member
/// (`Value::Null` when the action has no result).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, action: &str, payload: Option<Value>) -> Result<Value>;
}

/// Call `action` with `body` and decode the result into `R`.
pub async fn call<T, R>(transport: &dyn Transport, action: &str, body: &T) -> Result<R>
where
    T: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let payload = serde_json::to_value(body)?;
    let value = transport.call(action, Some(payload)).await?;
    Ok(serde_json::from_value(value)?)
}

/// Call `action` with `body`, ignoring any result.
pub async fn call_unit<T>(transport: &dyn Transport, action: &str, body: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_value(body)?;
    transport.call(action, Some(payload)).await?;
    Ok(())
}

/// Call a body-less action and decode the result into `R`.
pub async fn query<R>(transport: &dyn Transport, action: &str) -> Result<R>
where
    R: DeserializeOwned,
{
    let value = transport.call(action, None).await?;
    Ok(serde_json::from_value(value)?)
}

/// Nest `body` under `key`, the shape several actions expect.
pub fn wrapped<T>(key: &str, body: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    let mut object = serde_json::Map::new();
    object.insert(key.to_string(), serde_json::to_value(body)?);
    Ok(Value::Object(object))
}

/// Decode a listing result, treating `null` as an empty list.
pub fn list_or_empty<R>(value: Option<Vec<R>>) -> Vec<R> {
    value.unwrap_or_default()
}

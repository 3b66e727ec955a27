use crate::event_error::EventError;
use async_trait::async_trait;

#[async_trait]
pub trait ModelObserver<T: Send + Sync>: Send + Sync {
    async fn creating(&self, _model: &mut T) -> Result<(), EventError> {
        Ok(())
    }

    async fn created(&self, _model: &T) -> Result<(), EventError> {
        Ok(())
    }

    async fn saving(&self, _model: &mut T) -> Result<(), EventError> {
        Ok(())
    }

    async fn saved(&self, _model: &T) -> Result<(), EventError> {
        Ok(())
    }
}

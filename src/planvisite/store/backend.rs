use crate::error::Result;
use std::rc::Rc;

/// Raw key-value storage of serialized text.
///
/// This trait is the "how" of storage (filesystem vs memory); the
/// [`Persistence`](super::Persistence) adapter on top of it decides what
/// gets written and how a missing or corrupt value is treated.
pub trait StorageBackend {
    /// Read the text stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic so a reader never observes a partial write.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

use std::fmt::Debug;

use log::info;

use crate::core::item::{ItemWriter, ItemWriterResult};

/// Writer that logs every item at info level instead of persisting it.
///
/// Handy while wiring up a pipeline, before the real sink exists.
#[derive(Default)]
pub struct LoggerWriter;

impl<T> ItemWriter<T> for LoggerWriter
where
    T: Debug,
{
    fn write(&self, items: &[T]) -> ItemWriterResult {
        for item in items {
            info!("Item: {item:?}");
        }
        Ok(())
    }
}

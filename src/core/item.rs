use crate::error::XmlifyError;

/// Result of a read operation. `Ok(None)` signals the end of the input.
pub type ItemReaderResult<R> = Result<Option<R>, XmlifyError>;

/// Result of a process operation.
pub type ItemProcessorResult<W> = Result<W, XmlifyError>;

/// Result of a write operation.
pub type ItemWriterResult = Result<(), XmlifyError>;

/// Source of the items flowing through a step.
pub trait ItemReader<R> {
    /// Reads the next item, or `Ok(None)` once the input is exhausted.
    fn read(&self) -> ItemReaderResult<R>;
}

/// Transformation applied to every item between reading and writing.
pub trait ItemProcessor<R, W> {
    /// Turns one read item into one writable item.
    fn process(&self, item: &R) -> ItemProcessorResult<W>;
}

/// Sink for the items produced by a step.
///
/// `open` is called once before the first chunk, `flush` after every chunk
/// and `close` once after the last one. Only `write` has no default.
pub trait ItemWriter<W> {
    /// Writes a chunk of items.
    fn write(&self, items: &[W]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

/// Processor that hands items through unchanged.
///
/// Used by steps that only move data from a reader to a writer.
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::item::{DefaultProcessor, ItemProcessor};
///
/// let item = "unchanged".to_string();
/// assert_eq!(DefaultProcessor.process(&item).unwrap(), item);
/// ```
#[derive(Default)]
pub struct DefaultProcessor;

impl<R: Clone> ItemProcessor<R, R> for DefaultProcessor {
    fn process(&self, item: &R) -> ItemProcessorResult<R> {
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopWriter;

    impl ItemWriter<String> for NoopWriter {
        fn write(&self, _items: &[String]) -> ItemWriterResult {
            Ok(())
        }
    }

    #[test]
    fn writer_lifecycle_defaults_do_nothing() {
        let writer = NoopWriter;

        assert!(writer.open().is_ok());
        assert!(writer.write(&[]).is_ok());
        assert!(writer.flush().is_ok());
        assert!(writer.close().is_ok());
    }

    #[test]
    fn default_processor_clones_the_item() {
        let item = vec![1, 2, 3];
        let processed = DefaultProcessor.process(&item).unwrap();

        assert_eq!(processed, item);
    }
}

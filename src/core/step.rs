use std::{
    cell::Cell,
    time::{Duration, Instant},
};

use log::{debug, error};

use crate::XmlifyError;

use super::item::{ItemProcessor, ItemReader, ItemWriter};

#[derive(Debug, PartialEq)]
enum ChunkStatus {
    Error,
    Finished,
    Full,
}

/// State of a step, queryable while the step instance is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Error,
    Success,
    Started,
}

/// Timing and counters of one finished step run.
#[derive(Debug)]
pub struct StepExecution {
    pub start: Instant,
    pub end: Instant,
    pub duration: Duration,
    pub status: StepStatus,
    pub read_count: usize,
    pub write_count: usize,
    pub read_error_count: usize,
    pub process_error_count: usize,
    pub write_error_count: usize,
}

/// A chunk-oriented step.
///
/// A step pulls items from a reader, runs each through a processor and hands
/// the results to a writer in chunks. The writer is flushed after every chunk,
/// so a failing run leaves every fully written chunk behind.
///
/// Item-level errors are counted and skipped until the number of failed items
/// exceeds the skip limit; the run then stops with [`StepStatus::Error`]. The
/// default skip limit is zero, meaning the first failed item ends the run.
///
/// Counters stay readable on the instance after [`execute`] returns, which is
/// mostly useful when the run failed and no [`StepExecution`] is available.
///
/// [`execute`]: StepInstance::execute
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use xmlify_rs::core::{
///     config::EncoderConfigBuilder,
///     encoder::RowXmlEncoder,
///     item::{ItemReader, ItemReaderResult, ItemWriter, ItemWriterResult},
///     row::{ColumnDescriptor, Row, RowValue},
///     step::{StepBuilder, StepStatus},
/// };
///
/// struct RowReader {
///     rows: RefCell<std::vec::IntoIter<Row>>,
/// }
///
/// impl ItemReader<Row> for RowReader {
///     fn read(&self) -> ItemReaderResult<Row> {
///         Ok(self.rows.borrow_mut().next())
///     }
/// }
///
/// struct Collector {
///     documents: RefCell<Vec<String>>,
/// }
///
/// impl ItemWriter<String> for Collector {
///     fn write(&self, items: &[String]) -> ItemWriterResult {
///         self.documents.borrow_mut().extend_from_slice(items);
///         Ok(())
///     }
/// }
///
/// let reader = RowReader {
///     rows: RefCell::new(
///         vec![vec![RowValue::text("1")], vec![RowValue::text("2")]].into_iter(),
///     ),
/// };
/// let encoder = RowXmlEncoder::new(
///     ColumnDescriptor::from_names(["id"]),
///     EncoderConfigBuilder::new()
///         .include_xml_declaration(false)
///         .build(),
/// );
/// let collector = Collector {
///     documents: RefCell::new(Vec::new()),
/// };
///
/// let step = StepBuilder::new("encode")
///     .reader(&reader)
///     .processor(&encoder)
///     .writer(&collector)
///     .chunk(10)
///     .build();
///
/// let execution = step.execute()?;
///
/// assert_eq!(execution.status, StepStatus::Success);
/// assert_eq!(execution.read_count, 2);
/// assert_eq!(execution.write_count, 2);
/// assert_eq!(
///     collector.documents.borrow()[0],
///     r#"<row><col name="id">1</col></row>"#
/// );
/// # Ok::<(), xmlify_rs::XmlifyError>(())
/// ```
pub struct StepInstance<'a, R, W> {
    name: String,
    reader: &'a dyn ItemReader<R>,
    processor: &'a dyn ItemProcessor<R, W>,
    writer: &'a dyn ItemWriter<W>,
    chunk_size: usize,
    skip_limit: usize,
    status: Cell<StepStatus>,
    read_count: Cell<usize>,
    write_count: Cell<usize>,
    read_error_count: Cell<usize>,
    process_error_count: Cell<usize>,
    write_error_count: Cell<usize>,
}

impl<'a, R, W> StepInstance<'a, R, W> {
    /// Runs the step to completion.
    ///
    /// # Errors
    ///
    /// Returns [`XmlifyError::Step`] when the skip limit is exceeded, and the
    /// writer's error when opening or closing the writer fails. The counters
    /// on the instance remain readable either way.
    pub fn execute(&self) -> Result<StepExecution, XmlifyError> {
        let start = Instant::now();

        debug!("Start of step: {}", self.name);

        self.writer.open()?;

        let mut read_items: Vec<R> = Vec::with_capacity(self.chunk_size);

        let status = loop {
            let read_status = self.read_chunk(&mut read_items);
            if read_status == ChunkStatus::Error {
                break StepStatus::Error;
            }

            let processed_items = self.process_chunk(&read_items);
            if self.skip_limit_reached() {
                break StepStatus::Error;
            }

            let write_status = self.write_chunk(&processed_items);
            if write_status == ChunkStatus::Error {
                break StepStatus::Error;
            }

            if read_status == ChunkStatus::Finished {
                break StepStatus::Success;
            }
        };

        self.status.set(status);
        self.writer.close()?;

        debug!("End of step: {}", self.name);

        let execution = StepExecution {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            status,
            read_count: self.read_count.get(),
            write_count: self.write_count.get(),
            read_error_count: self.read_error_count.get(),
            process_error_count: self.process_error_count.get(),
            write_error_count: self.write_error_count.get(),
        };

        if status == StepStatus::Error {
            return Err(XmlifyError::Step(format!(
                "step '{}' exceeded its skip limit of {}",
                self.name, self.skip_limit
            )));
        }

        Ok(execution)
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_status(&self) -> StepStatus {
        self.status.get()
    }

    pub fn get_read_count(&self) -> usize {
        self.read_count.get()
    }

    pub fn get_write_count(&self) -> usize {
        self.write_count.get()
    }

    pub fn get_read_error_count(&self) -> usize {
        self.read_error_count.get()
    }

    pub fn get_process_error_count(&self) -> usize {
        self.process_error_count.get()
    }

    pub fn get_write_error_count(&self) -> usize {
        self.write_error_count.get()
    }

    fn read_chunk(&self, read_items: &mut Vec<R>) -> ChunkStatus {
        debug!("Start reading chunk");
        read_items.clear();

        loop {
            match self.reader.read() {
                Ok(Some(item)) => {
                    read_items.push(item);
                    self.inc_read_count();

                    if read_items.len() == self.chunk_size {
                        // The chunk is full, we can process and write items
                        debug!("End reading chunk: FULL");
                        return ChunkStatus::Full;
                    }
                }
                Ok(None) => {
                    // All items of the reader have been read
                    debug!("End reading chunk: FINISHED");
                    return ChunkStatus::Finished;
                }
                Err(error) => {
                    self.inc_read_error_count();
                    error!("Error occurred during item read: {}", error);

                    if self.skip_limit_reached() {
                        return ChunkStatus::Error;
                    }
                }
            }
        }
    }

    fn process_chunk(&self, read_items: &[R]) -> Vec<W> {
        debug!("Start processing chunk");

        let mut processed_items = Vec::with_capacity(read_items.len());
        for item in read_items {
            match self.processor.process(item) {
                Ok(processed) => processed_items.push(processed),
                Err(error) => {
                    self.inc_process_error_count();
                    error!("Error occurred during item processing: {}", error);

                    if self.skip_limit_reached() {
                        break;
                    }
                }
            }
        }

        debug!("End processing chunk");
        processed_items
    }

    fn write_chunk(&self, processed_items: &[W]) -> ChunkStatus {
        debug!("Start writing chunk");

        match self
            .writer
            .write(processed_items)
            .and_then(|()| self.writer.flush())
        {
            Ok(()) => {
                self.inc_write_count(processed_items.len());
                debug!("End writing chunk");
                ChunkStatus::Full
            }
            Err(error) => {
                self.inc_write_error_count(processed_items.len());
                error!("Error occurred during chunk write: {}", error);

                if self.skip_limit_reached() {
                    ChunkStatus::Error
                } else {
                    ChunkStatus::Full
                }
            }
        }
    }

    fn skip_limit_reached(&self) -> bool {
        self.read_error_count.get() + self.process_error_count.get() + self.write_error_count.get()
            > self.skip_limit
    }

    fn inc_read_count(&self) {
        self.read_count.set(self.read_count.get() + 1);
    }

    fn inc_read_error_count(&self) {
        self.read_error_count.set(self.read_error_count.get() + 1);
    }

    fn inc_process_error_count(&self) {
        self.process_error_count.set(self.process_error_count.get() + 1);
    }

    fn inc_write_count(&self, count: usize) {
        self.write_count.set(self.write_count.get() + count);
    }

    fn inc_write_error_count(&self, count: usize) {
        self.write_error_count.set(self.write_error_count.get() + count);
    }
}

/// A builder for step instances.
pub struct StepBuilder<'a, R, W> {
    name: String,
    reader: Option<&'a dyn ItemReader<R>>,
    processor: Option<&'a dyn ItemProcessor<R, W>>,
    writer: Option<&'a dyn ItemWriter<W>>,
    chunk_size: usize,
    skip_limit: usize,
}

impl<'a, R, W> StepBuilder<'a, R, W> {
    /// Creates a builder for a step called `name`. The name only appears in
    /// logs and error messages.
    pub fn new<S: Into<String>>(name: S) -> StepBuilder<'a, R, W> {
        Self {
            name: name.into(),
            reader: None,
            processor: None,
            writer: None,
            chunk_size: 1,
            skip_limit: 0,
        }
    }

    /// Sets the reader the step pulls items from. Required.
    pub fn reader(mut self, reader: &'a impl ItemReader<R>) -> StepBuilder<'a, R, W> {
        self.reader = Some(reader);
        self
    }

    /// Sets the processor applied to every item. Required. Steps that forward
    /// items unchanged can use [`DefaultProcessor`](crate::core::item::DefaultProcessor).
    pub fn processor(mut self, processor: &'a impl ItemProcessor<R, W>) -> StepBuilder<'a, R, W> {
        self.processor = Some(processor);
        self
    }

    /// Sets the writer the step hands chunks to. Required.
    pub fn writer(mut self, writer: &'a impl ItemWriter<W>) -> StepBuilder<'a, R, W> {
        self.writer = Some(writer);
        self
    }

    /// Sets how many items are written per chunk. A chunk size of zero is
    /// treated as one. Defaults to one.
    pub fn chunk(mut self, chunk_size: usize) -> StepBuilder<'a, R, W> {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets how many failed items the step tolerates before giving up.
    /// Defaults to zero.
    pub fn skip_limit(mut self, skip_limit: usize) -> StepBuilder<'a, R, W> {
        self.skip_limit = skip_limit;
        self
    }

    /// Builds the step instance.
    ///
    /// # Panics
    ///
    /// Panics when no reader, no processor or no writer was provided.
    pub fn build(self) -> StepInstance<'a, R, W> {
        StepInstance {
            name: self.name,
            reader: self.reader.expect("a reader is required"),
            processor: self.processor.expect("a processor is required"),
            writer: self.writer.expect("a writer is required"),
            chunk_size: self.chunk_size,
            skip_limit: self.skip_limit,
            status: Cell::new(StepStatus::Started),
            read_count: Cell::new(0),
            write_count: Cell::new(0),
            read_error_count: Cell::new(0),
            process_error_count: Cell::new(0),
            write_error_count: Cell::new(0),
        }
    }
}

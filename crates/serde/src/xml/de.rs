//! Fragment to record mapping.
//!
//! Each fragment is handled on its own. A field that is missing from the
//! fragment keeps its zero value; a field whose text cannot be coerced also
//! keeps its zero value and is reported as a [`FieldDiagnostic`]. Only a
//! failure to construct the record itself drops the fragment.

use std::fmt;
use std::marker::PhantomData;

use exlibris_record::{CoercionError, Record, coerce};
use tracing::{debug, error, trace, warn};

use crate::error::MappingError;
use crate::xml::extract::{ExtractMode, Extractor};

/// A field that kept its zero value because its text could not be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiagnostic {
    pub field: &'static str,
    pub error: CoercionError,
}

impl fmt::Display for FieldDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// One mapped fragment together with its field diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord<T> {
    pub record: T,
    pub diagnostics: Vec<FieldDiagnostic>,
}

/// The outcome of mapping a batch of fragments.
///
/// Indices refer to the position of the fragment in the input.
#[derive(Debug)]
pub struct MappingReport<T> {
    /// Mapped records, in input order.
    pub records: Vec<T>,
    /// Coercion failures of records that were kept.
    pub diagnostics: Vec<(usize, FieldDiagnostic)>,
    /// Fragments that produced no record.
    pub dropped: Vec<(usize, MappingError)>,
}

impl<T> MappingReport<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            diagnostics: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Whether every fragment mapped without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.dropped.is_empty()
    }

    /// Discards the diagnostics.
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// Maps fragments into records of type `T`.
pub struct ResultMapper<T> {
    extractor: Extractor,
    _target: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for ResultMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultMapper")
            .field("extractor", &self.extractor)
            .finish()
    }
}

impl<T> Clone for ResultMapper<T> {
    fn clone(&self) -> Self {
        Self {
            extractor: self.extractor.clone(),
            _target: PhantomData,
        }
    }
}

impl<T: Record> ResultMapper<T> {
    /// Creates a mapper using [`ExtractMode::Pattern`].
    pub fn new() -> Result<Self, MappingError> {
        Self::with_mode(ExtractMode::default())
    }

    /// Creates a mapper using `mode`.
    pub fn with_mode(mode: ExtractMode) -> Result<Self, MappingError> {
        Ok(Self {
            extractor: Extractor::new(T::fields(), mode)?,
            _target: PhantomData,
        })
    }

    /// The extraction mode in use.
    pub fn mode(&self) -> ExtractMode {
        self.extractor.mode()
    }

    /// Maps one fragment.
    ///
    /// Fails only when `T` cannot be instantiated.
    pub fn map_fragment(&self, fragment: &str) -> Result<MappedRecord<T>, MappingError> {
        let mut record = T::instantiate()?;
        let mut diagnostics = Vec::new();

        for field in T::fields() {
            let Some(text) = self.extractor.extract(fragment, field.name) else {
                trace!(record = T::TYPE_NAME, field = field.name, "Field not present");
                continue;
            };

            let stored = coerce(&text, field.kind).and_then(|value| record.assign(field.name, value));
            if let Err(err) = stored {
                warn!(
                    record = T::TYPE_NAME,
                    field = field.name,
                    error = %err,
                    "Field left at default value"
                );
                diagnostics.push(FieldDiagnostic {
                    field: field.name,
                    error: err,
                });
            }
        }

        Ok(MappedRecord {
            record,
            diagnostics,
        })
    }

    /// Maps every fragment, dropping those that fail. Output order follows
    /// input order.
    pub fn map_all<I, S>(&self, fragments: I) -> Vec<T>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.map_all_report(fragments).into_records()
    }

    /// Maps every fragment and keeps what went wrong along the way.
    pub fn map_all_report<I, S>(&self, fragments: I) -> MappingReport<T>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = MappingReport::new();

        for (index, fragment) in fragments.into_iter().enumerate() {
            match self.map_fragment(fragment.as_ref()) {
                Ok(mapped) => {
                    report.records.push(mapped.record);
                    report
                        .diagnostics
                        .extend(mapped.diagnostics.into_iter().map(|d| (index, d)));
                }
                Err(err) => {
                    error!(
                        record = T::TYPE_NAME,
                        index,
                        error = %err,
                        "Dropping result fragment"
                    );
                    report.dropped.push((index, err));
                }
            }
        }

        debug!(
            record = T::TYPE_NAME,
            mapped = report.records.len(),
            dropped = report.dropped.len(),
            "Mapped result fragments"
        );
        report
    }
}

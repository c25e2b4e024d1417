//! In-memory `LambdaApi` and log capture for tests.
//!
//! Functions are keyed by ARN (see [`arn_for`]); lookups also accept the bare
//! function name. Markers are stringified offsets into the backing list.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::api::{
    AliasSummary, ApiError, ApiErrorKind, FunctionSummary, LambdaApi, Page, PageRequest,
    VersionSummary,
};

/// ARN the mock assigns to a function named `name`.
pub fn arn_for(name: &str) -> String {
    format!("arn:aws:lambda:us-east-1:123456789012:function:{}", name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListFunctions,
    ListVersions,
    ListAliases,
    DeleteVersion,
}

impl MockOperation {
    fn api_name(self) -> &'static str {
        match self {
            MockOperation::ListFunctions => "ListFunctions",
            MockOperation::ListVersions => "ListVersionsByFunction",
            MockOperation::ListAliases => "ListAliases",
            MockOperation::DeleteVersion => "DeleteFunction",
        }
    }
}

#[derive(Default)]
struct MockState {
    functions: Vec<FunctionSummary>,
    versions: HashMap<String, Vec<String>>,
    aliases: HashMap<String, Vec<AliasSummary>>,
    failures: HashMap<MockOperation, VecDeque<ApiError>>,
    calls: HashMap<MockOperation, usize>,
    deleted: Vec<(String, String)>,
}

#[derive(Default)]
pub struct MockLambda {
    page_size: Option<usize>,
    state: Mutex<MockState>,
}

impl MockLambda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. Every function starts with a `$LATEST` version.
    pub fn with_function(self, name: &str) -> Self {
        {
            let mut state = self.lock();
            let arn = arn_for(name);
            state.functions.push(FunctionSummary {
                name: name.to_string(),
                arn: arn.clone(),
            });
            state
                .versions
                .entry(arn.clone())
                .or_insert_with(|| vec!["$LATEST".to_string()]);
            state.aliases.entry(arn).or_default();
        }
        self
    }

    /// Replace the version list of `name`.
    pub fn with_versions(self, name: &str, versions: &[&str]) -> Self {
        self.lock().versions.insert(
            arn_for(name),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn with_alias(self, name: &str, alias: AliasSummary) -> Self {
        self.lock()
            .aliases
            .entry(arn_for(name))
            .or_default()
            .push(alias);
        self
    }

    /// Serve at most `page_size` items per page regardless of the request.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Make the next call to `operation` fail with `error`. Queued failures are
    /// consumed in order.
    pub fn fail_next(&self, operation: MockOperation, error: ApiError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    pub fn calls(&self, operation: MockOperation) -> usize {
        self.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// `(function ARN, version)` pairs deleted so far.
    pub fn deleted(&self) -> Vec<(String, String)> {
        self.lock().deleted.clone()
    }

    pub fn remaining_versions(&self, name: &str) -> Vec<String> {
        self.lock()
            .versions
            .get(&arn_for(name))
            .cloned()
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call and pop a scripted failure if one is queued.
    fn begin(&self, operation: MockOperation) -> Result<MutexGuard<'_, MockState>, ApiError> {
        let mut state = self.lock();
        *state.calls.entry(operation).or_insert(0) += 1;
        if let Some(error) = state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(state)
    }

    fn paginate<T: Clone>(
        &self,
        operation: MockOperation,
        items: &[T],
        request: &PageRequest,
    ) -> Result<Page<T>, ApiError> {
        let start = match request.marker.as_deref() {
            None => 0,
            Some(marker) => marker.parse::<usize>().map_err(|_| {
                ApiError::new(
                    operation.api_name(),
                    ApiErrorKind::InvalidRequest,
                    format!("invalid marker '{}'", marker),
                )
            })?,
        };
        let size = self.page_size.unwrap_or(request.page_size.max(1) as usize);
        let end = (start + size).min(items.len());
        let page = items.get(start..end).unwrap_or_default().to_vec();

        Ok(if end < items.len() {
            Page::with_next(page, end.to_string())
        } else {
            Page::last(page)
        })
    }
}

fn resolve_key(function: &str) -> String {
    if function.starts_with("arn:") {
        function.to_string()
    } else {
        arn_for(function)
    }
}

fn not_found(operation: MockOperation, what: String) -> ApiError {
    ApiError::new(operation.api_name(), ApiErrorKind::NotFound, what)
        .with_code("ResourceNotFoundException")
}

#[async_trait]
impl LambdaApi for MockLambda {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_functions(
        &self,
        request: &PageRequest,
    ) -> Result<Page<FunctionSummary>, ApiError> {
        let operation = MockOperation::ListFunctions;
        let state = self.begin(operation)?;
        self.paginate(operation, &state.functions, request)
    }

    async fn list_versions(
        &self,
        function: &str,
        request: &PageRequest,
    ) -> Result<Page<VersionSummary>, ApiError> {
        let operation = MockOperation::ListVersions;
        let state = self.begin(operation)?;
        let versions = state
            .versions
            .get(&resolve_key(function))
            .ok_or_else(|| not_found(operation, format!("Function not found: {}", function)))?;
        let page = self.paginate(operation, versions, request)?;
        Ok(Page {
            items: page.items.into_iter().map(VersionSummary::new).collect(),
            next_marker: page.next_marker,
        })
    }

    async fn list_aliases(
        &self,
        function: &str,
        request: &PageRequest,
    ) -> Result<Page<AliasSummary>, ApiError> {
        let operation = MockOperation::ListAliases;
        let state = self.begin(operation)?;
        let aliases = state
            .aliases
            .get(&resolve_key(function))
            .ok_or_else(|| not_found(operation, format!("Function not found: {}", function)))?;
        self.paginate(operation, aliases, request)
    }

    async fn delete_version(&self, function: &str, version: &str) -> Result<(), ApiError> {
        let operation = MockOperation::DeleteVersion;
        let mut state = self.begin(operation)?;
        let key = resolve_key(function);
        let versions = state
            .versions
            .get_mut(&key)
            .ok_or_else(|| not_found(operation, format!("Function not found: {}", function)))?;
        let position = versions
            .iter()
            .position(|v| v == version)
            .ok_or_else(|| {
                not_found(
                    operation,
                    format!("Function not found: {}:{}", function, version),
                )
            })?;
        versions.remove(position);
        state.deleted.push((key, version.to_string()));
        Ok(())
    }
}

/// Records the `event` name and message of every tracing event while installed.
#[derive(Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

impl EventCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make this the current thread's subscriber until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn count(&self, event: &str) -> usize {
        self.lock().iter().filter(|(name, _)| name == event).count()
    }

    /// Messages of every captured `event`, in emission order.
    pub fn messages(&self, event: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Default)]
struct EventFields {
    event: Option<String>,
    message: String,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "event" => self.event = Some(format!("{:?}", value)),
            "message" => self.message = format!("{:?}", value),
            _ => {}
        }
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        if let Some(name) = fields.event {
            self.lock().push((name, fields.message));
        }
    }
}

//! Location resolution: base-id substitution, region normalization and the
//! filesystem-backed attributes (existence, snippet text).

use sarif_explorer_schema::FileLocation;
use sarif_explorer_schema::PhysicalLocation;
use sarif_explorer_schema::Region;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use crate::config::NormalizerConfig;
use crate::documents::DocumentProvider;
use crate::message::StringTable;
use crate::message::format_message;
use crate::model::FileStatus;
use crate::model::Location;
use crate::model::Range;
use crate::ordered::map_in_order;

/// Resolves schema locations against one run's base-URI table.
pub struct LocationResolver<'a> {
    uri_base_ids: Option<&'a BTreeMap<String, String>>,
    documents: Option<&'a dyn DocumentProvider>,
    config: &'a NormalizerConfig,
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        uri_base_ids: Option<&'a BTreeMap<String, String>>,
        documents: Option<&'a dyn DocumentProvider>,
        config: &'a NormalizerConfig,
    ) -> Self {
        Self {
            uri_base_ids,
            documents,
            config,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        self.config
    }

    /// Absolute URI for `file`, substituting its base id when the run
    /// declares one. Unknown base ids leave the URI as written.
    pub fn resolve_uri(&self, file: &FileLocation) -> String {
        let Some(base_id) = file.uri_base_id.as_deref() else {
            return file.uri.clone();
        };

        match self.uri_base_ids.and_then(|table| table.get(base_id)) {
            Some(base) => join_base_uri(base, &file.uri),
            None => {
                debug!("Unknown uriBaseId {base_id} for {}", file.uri);
                file.uri.clone()
            }
        }
    }

    /// Resolve a file reference and optional region into a [`Location`].
    pub async fn resolve(&self, file: &FileLocation, region: Option<&Region>) -> Location {
        let mut location = Location::new(self.resolve_uri(file));
        location.range = region.and_then(|region| Range::from_coordinates(region.coordinates()));
        location.snippet = region
            .and_then(|region| region.snippet.as_ref())
            .and_then(|snippet| snippet.text.clone());

        if let Some(documents) = self.documents {
            match documents.read_document(&location.uri).await {
                Some(text) => {
                    location.file_status = FileStatus::Mapped;
                    if let Some(range) = location.range.as_mut() {
                        complete_end_column(range, &text);
                    }
                    if location.snippet.is_none() && self.config.extract_snippets {
                        location.snippet = location
                            .range
                            .as_ref()
                            .and_then(|range| extract_snippet(&text, range));
                    }
                }
                None => {
                    location.file_status = FileStatus::Missing;
                    location.range = None;
                    location.snippet = None;
                }
            }
        }

        if let Some(snippet) = location.snippet.take() {
            location.snippet = Some(truncate_chars(snippet, self.config.max_snippet_chars));
        }
        location
    }

    pub async fn resolve_physical(&self, physical: &PhysicalLocation) -> Location {
        let mut location = self
            .resolve(&physical.file_location, physical.region.as_ref())
            .await;
        location.id = physical.id;
        location
    }

    /// Resolve a schema location. Locations without a physical part cannot be
    /// addressed and resolve to `None`. `tables` serve `messageId` lookups for
    /// the location's message.
    pub async fn resolve_location(
        &self,
        location: &sarif_explorer_schema::Location,
        tables: &[&StringTable],
    ) -> Option<Location> {
        let physical = location.physical_location.as_ref()?;
        let mut resolved = self.resolve_physical(physical).await;
        resolved.message = location
            .message
            .as_ref()
            .and_then(|message| format_message(message, tables, &[]));
        resolved.logical_name = location.fully_qualified_logical_name.clone();
        Some(resolved)
    }

    /// Resolve a location list, keeping positions. An absent list becomes a
    /// single placeholder; an empty list stays empty.
    pub async fn resolve_locations(
        &self,
        locations: Option<&[sarif_explorer_schema::Location]>,
        tables: &[&StringTable],
    ) -> Vec<Option<Location>> {
        let Some(locations) = locations else {
            return vec![None];
        };

        map_in_order(self.config.concurrent_resolution, locations, |location| {
            self.resolve_location(location, tables)
        })
        .await
    }
}

/// Concatenate a base URI and a relative reference. Leading separators on
/// `relative` never discard the base path.
pub fn join_base_uri(base: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches(['/', '\\']);
    if let Ok(base_url) = Url::parse(base) {
        // One-letter schemes are Windows drive letters, not URLs.
        if base_url.scheme().len() > 1 {
            let mut base_url = base_url;
            if !base_url.path().ends_with('/') {
                let path = format!("{}/", base_url.path());
                base_url.set_path(&path);
            }
            if let Ok(joined) = base_url.join(relative) {
                return joined.to_string();
            }
        }
    }

    if base.ends_with(['/', '\\']) {
        format!("{base}{relative}")
    } else {
        format!("{base}/{relative}")
    }
}

fn document_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

fn complete_end_column(range: &mut Range, text: &str) {
    let Range::LineColumn {
        start_column,
        end_line,
        end_column,
        ..
    } = range
    else {
        return;
    };
    if end_column.is_some() {
        return;
    }

    let lines = document_lines(text);
    if let Some(line) = lines.get((*end_line as usize).saturating_sub(1)) {
        let length = u32::try_from(line.chars().count()).unwrap_or(u32::MAX);
        *end_column = Some(length.max(*start_column));
    }
}

/// Slice the text covered by `range` out of `text`. Returns `None` for empty
/// or out-of-bounds ranges.
pub fn extract_snippet(text: &str, range: &Range) -> Option<String> {
    let snippet = match *range {
        Range::LineColumn {
            start_line,
            start_column,
            end_line,
            end_column,
        } => {
            let lines = document_lines(text);
            let first = (start_line as usize).saturating_sub(1);
            let last = (end_line as usize).min(lines.len());
            if first >= last {
                return None;
            }

            let mut selected = Vec::with_capacity(last - first);
            for (index, line) in lines[first..last].iter().enumerate() {
                let line_number = first + index + 1;
                let skip = if line_number == start_line as usize {
                    (start_column as usize).saturating_sub(1)
                } else {
                    0
                };
                let take = match end_column {
                    Some(end) if line_number == end_line as usize => {
                        (end as usize).saturating_sub(skip)
                    }
                    _ => usize::MAX,
                };
                selected.push(line.chars().skip(skip).take(take).collect::<String>());
            }
            selected.join("\n")
        }
        Range::CharOffset { offset, length } => text
            .chars()
            .skip(offset as usize)
            .take(length as usize)
            .collect(),
        Range::ByteOffset { offset, length } => {
            let start = offset as usize;
            let end = start.saturating_add(length as usize).min(text.len());
            let bytes = text.as_bytes().get(start..end)?;
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    if snippet.is_empty() { None } else { Some(snippet) }
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    if max_chars == 0 {
        return text;
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

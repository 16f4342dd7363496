use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info};

use super::error::{LoadError, ReadError};
use super::fields::{extract_series_id, parse_cost, parse_flag, parse_list_cell, Flag};
use super::model::Card;

// ---------------------------------------------------------------------------
// Source descriptors
// ---------------------------------------------------------------------------

/// What a card list contains. Only `Parallel` changes how rows are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Official,
    Custom,
    /// Alternate-art printings; rows without an `is_parallel` value are parallel.
    Parallel,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Official => "official",
            SourceKind::Custom => "custom",
            SourceKind::Parallel => "parallel",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "official" => Ok(SourceKind::Official),
            "custom" => Ok(SourceKind::Custom),
            "parallel" => Ok(SourceKind::Parallel),
            other => Err(format!(
                "unknown source kind '{other}' (expected official, custom or parallel)"
            )),
        }
    }
}

/// One CSV input of the card collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub label: String,
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceDescriptor {
    pub fn new(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        SourceDescriptor {
            label: kind.as_str().to_string(),
            path: path.into(),
            kind,
        }
    }
}

/// The well-known card lists inside a data directory, in load order.
pub fn default_sources(data_dir: &Path) -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new(SourceKind::Official, data_dir.join("cardlist_filtered.csv")),
        SourceDescriptor::new(SourceKind::Custom, data_dir.join("custom_cards.csv")),
        SourceDescriptor::new(SourceKind::Parallel, data_dir.join("cardlist_p_only.csv")),
    ]
}

// ---------------------------------------------------------------------------
// Load results
// ---------------------------------------------------------------------------

/// A cell that could not be parsed and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub source: String,
    /// 1-based line in the source file.
    pub line: u64,
    pub card_id: String,
    pub column: &'static str,
    pub value: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} line {} ({}): unreadable {} '{}'",
            self.source, self.line, self.card_id, self.column, self.value
        )
    }
}

/// The concatenated collection plus the cells that were degraded on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub cards: Vec<Card>,
    pub warnings: Vec<ParseWarning>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the default card lists of `data_dir`.
pub fn load_data_dir(data_dir: &Path) -> Result<LoadReport, LoadError> {
    load_sources(&default_sources(data_dir))
}

/// Load and concatenate every present source, in order.
///
/// Missing files are skipped. Fails with [`LoadError::NotFound`] if none is
/// present, and with [`LoadError::Read`] as soon as a present file cannot be
/// read.
pub fn load_sources(sources: &[SourceDescriptor]) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    let mut found = false;

    for source in sources {
        let file = match File::open(&source.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("skipping missing {} card list {}", source.label, source.path.display());
                continue;
            }
            Err(err) => return Err(read_error(source, ReadError::Open(err))),
        };
        found = true;

        let cards = read_cards(file, source, &mut report.warnings)
            .map_err(|err| read_error(source, err))?;
        debug!("read {} cards from {}", cards.len(), source.path.display());
        report.cards.extend(cards);
    }

    if !found {
        return Err(LoadError::NotFound {
            searched: sources.iter().map(|s| s.path.clone()).collect(),
        });
    }

    info!(
        "loaded {} cards ({} degraded cells)",
        report.cards.len(),
        report.warnings.len()
    );
    Ok(report)
}

fn read_error(source: &SourceDescriptor, err: ReadError) -> LoadError {
    LoadError::Read {
        label: source.label.clone(),
        path: source.path.clone(),
        source: err,
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Parse one card list. Degraded cells are appended to `warnings`.
pub fn read_cards<R: Read>(
    reader: R,
    source: &SourceDescriptor,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Vec<Card>, ReadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ReadError::MissingHeader);
    }
    let columns = ColumnIndex::from_headers(&headers);

    let mut cards = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        cards.push(build_card(&columns, &record, source, line, warnings));
    }
    Ok(cards)
}

fn build_card(
    columns: &ColumnIndex,
    record: &StringRecord,
    source: &SourceDescriptor,
    line: u64,
    warnings: &mut Vec<ParseWarning>,
) -> Card {
    let get = |column: Column| columns.get(record, column);
    let card_id = get(Column::CardId).to_string();

    let mut warn = |column: Column, value: &str| {
        warnings.push(ParseWarning {
            source: source.label.clone(),
            line,
            card_id: card_id.clone(),
            column: column.label(),
            value: value.to_string(),
        });
    };

    let raw_cost = get(Column::Cost);
    let cost = parse_cost(raw_cost).unwrap_or_else(|| {
        warn(Column::Cost, raw_cost);
        0
    });

    let raw_parallel = get(Column::IsParallel);
    let is_parallel = match parse_flag(raw_parallel) {
        Flag::Value(value) => value,
        Flag::Unset => source.kind == SourceKind::Parallel,
        Flag::Invalid => {
            warn(Column::IsParallel, raw_parallel);
            false
        }
    };

    Card {
        card_id,
        name: get(Column::Name).to_string(),
        color: get(Column::Color).to_string(),
        card_type: get(Column::Type).to_string(),
        cost,
        counter: get(Column::Counter).to_string(),
        features: parse_list_cell(get(Column::Features)),
        attributes: parse_list_cell(get(Column::Attributes)),
        text: get(Column::Text).to_string(),
        trigger: get(Column::Trigger).to_string(),
        block_icon: get(Column::BlockIcon).to_string(),
        is_parallel,
        image_url: get(Column::ImageUrl).to_string(),
        series_id: extract_series_id(get(Column::AcquisitionInfo)),
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    CardId,
    Name,
    Color,
    Type,
    Cost,
    Counter,
    Features,
    Attributes,
    Text,
    Trigger,
    BlockIcon,
    ImageUrl,
    IsParallel,
    AcquisitionInfo,
}

const COLUMN_COUNT: usize = 14;

/// Header label of every recognized column.
const COLUMNS: [(&str, Column); COLUMN_COUNT] = [
    ("カードID", Column::CardId),
    ("カード名", Column::Name),
    ("色", Column::Color),
    ("タイプ", Column::Type),
    ("コスト", Column::Cost),
    ("カウンター", Column::Counter),
    ("特徴", Column::Features),
    ("属性", Column::Attributes),
    ("テキスト", Column::Text),
    ("トリガー", Column::Trigger),
    ("ブロックアイコン", Column::BlockIcon),
    ("画像URL", Column::ImageUrl),
    ("is_parallel", Column::IsParallel),
    ("入手情報", Column::AcquisitionInfo),
];

impl Column {
    fn label(self) -> &'static str {
        COLUMNS[self as usize].0
    }
}

/// Position of each recognized column in one file's header row.
struct ColumnIndex {
    positions: [Option<usize>; COLUMN_COUNT],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = [None; COLUMN_COUNT];
        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim_start_matches('\u{feff}');
            if let Some((_, column)) = COLUMNS.iter().find(|(label, _)| *label == header) {
                // first occurrence wins
                positions[*column as usize].get_or_insert(idx);
            }
        }
        ColumnIndex { positions }
    }

    fn get<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        self.positions[column as usize]
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
    }
}

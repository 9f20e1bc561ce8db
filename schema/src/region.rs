use crate::model::Region;

/// The coordinate system a [`Region`] is expressed in.
///
/// Exactly one variant applies to any region: line/column coordinates win
/// over character offsets, which win over byte offsets. A region carrying
/// none of them refers to the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionCoordinates {
    /// 1-based lines and columns. `end_column` is `None` when the region runs
    /// to the end of `end_line`.
    LineColumn {
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: Option<u32>,
    },
    CharOffset {
        offset: u64,
        length: u64,
    },
    ByteOffset {
        offset: u64,
        length: u64,
    },
    WholeFile,
}

impl Region {
    pub fn coordinates(&self) -> RegionCoordinates {
        if let Some(start_line) = self.start_line {
            let start_column = self.start_column.unwrap_or(1).max(1);
            let end_line = self.end_line.unwrap_or(start_line).max(start_line);
            return RegionCoordinates::LineColumn {
                start_line,
                start_column,
                end_line,
                end_column: self.end_column,
            };
        }

        if let Some(offset) = self.char_offset {
            return RegionCoordinates::CharOffset {
                offset,
                length: self.char_length.unwrap_or(0),
            };
        }

        if let Some(offset) = self.byte_offset {
            return RegionCoordinates::ByteOffset {
                offset,
                length: self.byte_length.unwrap_or(0),
            };
        }

        RegionCoordinates::WholeFile
    }
}

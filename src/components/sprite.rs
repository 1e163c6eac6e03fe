//! Sprite metadata and sprite-sheet frame selection.
//!
//! Images are owned by the presentation layer; a [`Sprite`] only records the
//! image key, its pixel dimensions and how big it is drawn. Sheet sprites
//! additionally carry a [`SpriteSheet`] describing a row-major grid of frames
//! and the inclusive frame range to play.
//!
//! Sheets are authored top-down (row 0 is the top of the image) while UV
//! space starts at the bottom-left, so [`SpriteSheet::uv`] flips the row.

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Guards against selecting one frame past the end at exactly `duration`.
const END_OF_SHEET_EPSILON: f32 = 0.001;

/// Identifier of an entry in the sprite table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteId {
    #[default]
    Nil,
    Player,
    Slug,
    Projectile0,
    Projectile0Sheet,
}

/// Invalid sprite-sheet layout. Raised at setup and treated as fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error("sprite sheet grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: u32, columns: u32 },
    #[error("last frame {end} must come after first frame {start}")]
    EmptyRange { start: u32, end: u32 },
    #[error("{which} frame ({row}, {col}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        which: &'static str,
        row: u32,
        col: u32,
        rows: u32,
        columns: u32,
    },
    #[error("playback fps must be positive (got {0})")]
    InvalidFps(f32),
}

/// UV rectangle as fractions of the sheet image, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpriteUv {
    pub start: Vec2,
    pub end: Vec2,
}

/// Frame grid and playback range of an animated sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub image_size: UVec2,
    pub rows: u32,
    pub columns: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub start_index: u32,
    pub end_index: u32,
    pub frame_count: u32,
    pub fps: f32,
}

impl SpriteSheet {
    /// Build a sheet playing frames `start..=end`, each given as `(row, col)`
    /// counted from the top-left of the image.
    pub fn new(
        image_size: UVec2,
        rows: u32,
        columns: u32,
        start: (u32, u32),
        end: (u32, u32),
        fps: f32,
    ) -> Result<Self, SheetError> {
        if rows == 0 || columns == 0 {
            return Err(SheetError::EmptyGrid { rows, columns });
        }
        for (which, (row, col)) in [("first", start), ("last", end)] {
            if row >= rows || col >= columns {
                return Err(SheetError::OutOfBounds {
                    which,
                    row,
                    col,
                    rows,
                    columns,
                });
            }
        }
        let start_index = start.0 * columns + start.1;
        let end_index = end.0 * columns + end.1;
        if end_index <= start_index {
            return Err(SheetError::EmptyRange {
                start: start_index,
                end: end_index,
            });
        }
        if fps <= 0.0 || !fps.is_finite() {
            return Err(SheetError::InvalidFps(fps));
        }

        Ok(Self {
            image_size,
            rows,
            columns,
            frame_width: image_size.x / columns,
            frame_height: image_size.y / rows,
            start_index,
            end_index,
            frame_count: end_index - start_index + 1,
            fps,
        })
    }

    /// Seconds for one pass over the frame range.
    pub fn duration(&self) -> f32 {
        self.frame_count as f32 / self.fps
    }

    /// Absolute sheet index of the frame shown `progress` seconds in.
    /// Progress past the end holds the last frame.
    pub fn frame_index(&self, progress: f32) -> u32 {
        let duration = self.duration();
        let elapsed = progress.max(0.0).min(duration - END_OF_SHEET_EPSILON);
        let t = elapsed / duration;
        let current = (self.frame_count as f32 * t).floor() as u32;
        self.start_index + current.min(self.frame_count - 1)
    }

    /// UV rectangle of the frame shown `progress` seconds in.
    pub fn uv(&self, progress: f32) -> SpriteUv {
        let index = self.frame_index(progress);
        let col = index % self.columns;
        let row_from_bottom = self.rows - (index / self.columns + 1);

        let x = (col * self.frame_width) as f32;
        let y = (row_from_bottom * self.frame_height) as f32;
        let w = self.image_size.x as f32;
        let h = self.image_size.y as f32;

        SpriteUv {
            start: Vec2::new(x / w, y / h),
            end: Vec2::new(
                (x + self.frame_width as f32) / w,
                (y + self.frame_height as f32) / h,
            ),
        }
    }
}

/// Immutable-after-load sprite description.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Key of the image in the presentation layer's texture store.
    pub image_key: String,
    pub image_size: UVec2,
    /// Size drawn in world units; also the hitbox size of entities using it.
    pub size: Vec2,
    pub sheet: Option<SpriteSheet>,
}

impl Sprite {
    /// Whole-image sprite drawn at its pixel size.
    pub fn new(image_key: impl Into<String>, image_size: UVec2) -> Self {
        Self {
            image_key: image_key.into(),
            image_size,
            size: image_size.as_vec2(),
            sheet: None,
        }
    }

    /// Turn this sprite into an animated sheet. Display size becomes one frame.
    pub fn with_sheet(
        mut self,
        rows: u32,
        columns: u32,
        start: (u32, u32),
        end: (u32, u32),
        fps: f32,
    ) -> Result<Self, SheetError> {
        let sheet = SpriteSheet::new(self.image_size, rows, columns, start, end, fps)?;
        self.size = Vec2::new(sheet.frame_width as f32, sheet.frame_height as f32);
        self.sheet = Some(sheet);
        Ok(self)
    }
}

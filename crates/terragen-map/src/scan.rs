//! Line-oriented scan for func_group entities.
//!
//! The map format is read one line at a time through an explicit state
//! machine. Each line is classified into a [`LineKind`], and [`ScanState::step`]
//! is the whole transition table. A group that closes with exactly one
//! brushDef is reported as a [`GroupCandidate`]; checking its faces is left to
//! the caller.

/// Line that opens a func_group, compared after trimming.
const GROUP_CLASS_LINE: &str = "\"classname\" \"func_group\"";
const ENTITY_MARKER: &str = "// entity";
const BRUSH_DEF: &str = "brushDef";

/// Inclusive range of source line indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

/// What a single trimmed line means to the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// `"classname" "func_group"`.
    GroupClass,
    /// A line starting with `// entity`.
    EntityMarker,
    /// `brushDef` keyword.
    BrushDef,
    /// A lone `}`.
    Close,
    /// A face line, starting with `(`.
    Face,
    Other,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        let line = line.trim();
        if line == GROUP_CLASS_LINE {
            LineKind::GroupClass
        } else if line.starts_with(ENTITY_MARKER) {
            LineKind::EntityMarker
        } else if line == BRUSH_DEF {
            LineKind::BrushDef
        } else if line == "}" {
            LineKind::Close
        } else if line.starts_with('(') {
            LineKind::Face
        } else {
            LineKind::Other
        }
    }
}

/// Progress through the current func_group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupProgress {
    /// First line of the entity block (the `// entity` marker two lines up).
    start: usize,
    brush_defs: usize,
    /// Face line indices of the most recent brushDef.
    faces: Vec<usize>,
}

/// Scanner state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScanState {
    /// Not inside a func_group.
    #[default]
    Outside,
    /// Inside a func_group, between brushes.
    InGroup(GroupProgress),
    /// Inside a brushDef body of a func_group.
    InBrushDef(GroupProgress),
}

/// A closed func_group holding exactly one brushDef.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupCandidate {
    /// Lines occupied by the whole entity block.
    pub span: LineSpan,
    /// Indices of the face lines of its brushDef.
    pub faces: Vec<usize>,
}

impl ScanState {
    /// Advance over line `index`. Returns the candidate closed by this line,
    /// if any.
    pub fn step(self, kind: LineKind, index: usize, is_last: bool) -> (Self, Option<GroupCandidate>) {
        if kind == LineKind::GroupClass {
            let progress = GroupProgress {
                start: index.saturating_sub(2),
                ..Default::default()
            };
            return (ScanState::InGroup(progress), None);
        }

        let next = match self {
            ScanState::Outside => return (ScanState::Outside, None),
            ScanState::InGroup(p) | ScanState::InBrushDef(p) if closes_group(kind, is_last) => {
                let candidate = (p.brush_defs == 1).then(|| {
                    // a marker belongs to the next entity, even on the last
                    // line; any other last line belongs to this one
                    let end = match kind {
                        LineKind::EntityMarker => index.saturating_sub(1),
                        _ => index,
                    };
                    GroupCandidate {
                        span: LineSpan { start: p.start, end },
                        faces: p.faces,
                    }
                });
                return (ScanState::Outside, candidate);
            }
            ScanState::InGroup(p) => match kind {
                LineKind::BrushDef => ScanState::InBrushDef(p.begin_brush()),
                _ => ScanState::InGroup(p),
            },
            ScanState::InBrushDef(mut p) => match kind {
                LineKind::BrushDef => ScanState::InBrushDef(p.begin_brush()),
                LineKind::Close => ScanState::InGroup(p),
                LineKind::Face => {
                    p.faces.push(index);
                    ScanState::InBrushDef(p)
                }
                _ => ScanState::InBrushDef(p),
            },
        };
        (next, None)
    }
}

impl GroupProgress {
    fn begin_brush(mut self) -> Self {
        self.brush_defs += 1;
        self.faces.clear();
        self
    }
}

fn closes_group(kind: LineKind, is_last: bool) -> bool {
    kind == LineKind::EntityMarker || is_last
}

/// Every func_group in `lines` that holds exactly one brushDef, in file order.
pub fn scan_groups<S: AsRef<str>>(lines: &[S]) -> Vec<GroupCandidate> {
    let mut state = ScanState::default();
    let mut found = Vec::new();
    let last = lines.len().saturating_sub(1);
    for (index, line) in lines.iter().enumerate() {
        let kind = LineKind::classify(line.as_ref());
        let (next, candidate) = state.step(kind, index, index == last);
        state = next;
        found.extend(candidate);
    }
    found
}

//! Border tracing for connected components
//!
//! [`ContourTracer`] follows one closed boundary of a component, either the
//! outer border or the border of a hole, with a clockwise neighbour search.
//! Every visited border pixel is written to the label image and appended to
//! the tail set of a [`PackedSets`]. Background pixels examined on the way
//! are marked with [`MARKED`] in the binary image, which is how the labeler
//! tells already traced holes from new ones.
//!
//! # Coordinates
//!
//! The binary image must carry a one pixel frame of background around the
//! actual data, so the search never leaves the buffer. The label image has
//! the size of the data without the frame. Start coordinates refer to the
//! framed binary image; recorded points refer to the unframed image.
//!
//! # Direction codes
//!
//! ```text
//!   8-connectivity        4-connectivity
//!
//!     5  6  7                  3
//!     4  .  0               2  .  0
//!     3  2  1                  1
//! ```
//!
//! Codes increase clockwise (y grows downward).

use crate::conncomp::ConnectivityType;
use blobtrace_core::{Gray, GrayImage, PackedSets, Point2D};

/// Value written into examined background pixels of the binary image.
pub const MARKED: u8 = 255;

/// Neighbour offsets `(dx, dy)` for 8-connectivity, indexed by direction
const OFFSETS_8: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Neighbour offsets `(dx, dy)` for 4-connectivity, indexed by direction
const OFFSETS_4: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Search start after a move, 8-connectivity: `((d + 4) % 8 + 2) % 8`
const NEXT_DIR_8: [usize; 8] = [6, 7, 0, 1, 2, 3, 4, 5];

/// Search start after a move, 4-connectivity: `((d + 2) % 4 + 1) % 4`
const NEXT_DIR_4: [usize; 4] = [3, 0, 1, 2];

/// Images and point storage a trace writes into.
///
/// The tracer only borrows these for the duration of one
/// [`ContourTracer::trace`] call.
#[derive(Debug)]
pub struct TraceTarget<'a> {
    /// Binary image with a one pixel background frame. Foreground is `1`.
    pub binary: &'a mut Gray<u8>,
    /// Label image, sized like `binary` without the frame
    pub labeled: &'a mut Gray<i32>,
    /// Traced points are appended to the tail set
    pub points: &'a mut PackedSets<Point2D>,
}

/// Clockwise contour follower for 4- or 8-connected components.
///
/// # Examples
///
/// ```
/// use blobtrace_core::{Gray, PackedSets};
/// use blobtrace_region::{ConnectivityType, ContourTracer, TraceTarget};
///
/// let input = Gray::from_rows(&[[1u8, 1], [1, 1]]).unwrap();
/// let mut binary = input.add_border(1, 0);
/// let mut labeled = Gray::<i32>::new(2, 2);
/// let mut points = PackedSets::new();
///
/// let mut tracer = ContourTracer::new(ConnectivityType::EightWay);
/// let mut target = TraceTarget {
///     binary: &mut binary,
///     labeled: &mut labeled,
///     points: &mut points,
/// };
/// tracer.trace(&mut target, 1, 1, 1, true);
/// assert_eq!(points.size_of_tail(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ContourTracer {
    rule: ConnectivityType,
    /// Neighbour offsets for the active rule
    offsets: &'static [(isize, isize)],
    next_dir: &'static [usize],
    /// Stop storing points once the tail set holds this many
    max_contour_size: usize,

    // buffer offsets per direction, valid for the cached strides
    offset_binary: [isize; 8],
    offset_label: [isize; 8],
    stride_binary: Option<usize>,
    stride_label: Option<usize>,

    // cursor
    x: usize,
    y: usize,
    dir: usize,
    index_binary: usize,
    index_label: usize,
}

impl ContourTracer {
    /// Create a tracer for the given connectivity rule.
    pub fn new(rule: ConnectivityType) -> Self {
        let (offsets, next_dir): (&'static [(isize, isize)], &'static [usize]) = match rule {
            ConnectivityType::FourWay => (&OFFSETS_4, &NEXT_DIR_4),
            ConnectivityType::EightWay => (&OFFSETS_8, &NEXT_DIR_8),
        };
        Self {
            rule,
            offsets,
            next_dir,
            max_contour_size: usize::MAX,
            offset_binary: [0; 8],
            offset_label: [0; 8],
            stride_binary: None,
            stride_label: None,
            x: 0,
            y: 0,
            dir: 0,
            index_binary: 0,
            index_label: 0,
        }
    }

    /// Connectivity rule used for tracing.
    pub fn rule(&self) -> ConnectivityType {
        self.rule
    }

    /// Maximum number of points stored per contour.
    pub fn max_contour_size(&self) -> usize {
        self.max_contour_size
    }

    /// Set the maximum number of points stored per contour.
    ///
    /// Tracing and labeling still run to completion once the limit is hit;
    /// only the point storage stops.
    pub fn set_max_contour_size(&mut self, max: usize) {
        self.max_contour_size = max;
    }

    /// Trace one contour.
    ///
    /// # Arguments
    ///
    /// * `target` - Framed binary image, label image and point storage
    /// * `label` - Value written into the label image for every border pixel
    /// * `x`, `y` - Start pixel in framed coordinates; must be foreground
    /// * `external` - `true` for an outer border, `false` for a hole border
    ///
    /// # Panics
    ///
    /// Panics on out-of-range buffer access if the binary image lacks the
    /// background frame or the start pixel lies on the frame.
    pub fn trace(
        &mut self,
        target: &mut TraceTarget<'_>,
        label: i32,
        x: usize,
        y: usize,
        external: bool,
    ) {
        self.update_layout(target);

        self.dir = self.initial_direction(external);
        self.x = x;
        self.y = y;
        self.index_binary = target.binary.index_of(x, y);
        self.index_label = target.labeled.index_of(x - 1, y - 1);

        self.add(target, label);

        // isolated pixel
        if !self.search(target.binary) {
            return;
        }

        let initial_dir = self.dir;
        self.move_to_found(target.binary);
        self.dir = self.next_dir[self.dir];

        loop {
            self.search(target.binary);
            if self.x == x && self.y == y && self.dir == initial_dir {
                return;
            }
            self.add(target, label);
            self.move_to_found(target.binary);
            self.dir = self.next_dir[self.dir];
        }
    }

    fn initial_direction(&self, external: bool) -> usize {
        match (self.rule, external) {
            (ConnectivityType::EightWay, true) => 7,
            (ConnectivityType::EightWay, false) => 3,
            (ConnectivityType::FourWay, true) => 0,
            (ConnectivityType::FourWay, false) => 2,
        }
    }

    /// Recompute the per-direction buffer offsets if a stride changed.
    fn update_layout(&mut self, target: &TraceTarget<'_>) {
        let stride_binary = target.binary.stride();
        if self.stride_binary != Some(stride_binary) {
            Self::compute_offsets(self.offsets, stride_binary, &mut self.offset_binary);
            self.stride_binary = Some(stride_binary);
        }
        let stride_label = target.labeled.stride();
        if self.stride_label != Some(stride_label) {
            Self::compute_offsets(self.offsets, stride_label, &mut self.offset_label);
            self.stride_label = Some(stride_label);
        }
    }

    fn compute_offsets(offsets: &[(isize, isize)], stride: usize, out: &mut [isize; 8]) {
        let stride = stride as isize;
        for (o, &(dx, dy)) in out.iter_mut().zip(offsets) {
            *o = dx + dy * stride;
        }
    }

    /// Label the current pixel and store it if there is room.
    fn add(&self, target: &mut TraceTarget<'_>, label: i32) {
        target.labeled.data_mut()[self.index_label] = label;
        if target.points.size_of_tail() < self.max_contour_size {
            target
                .points
                .push_tail(Point2D::new(self.x as i32 - 1, self.y as i32 - 1));
        }
    }

    /// Search the neighbours clockwise from `dir` for a foreground pixel.
    ///
    /// Leaves `dir` pointing at the pixel found. Every examined pixel that
    /// is not foreground is marked.
    fn search(&mut self, binary: &mut Gray<u8>) -> bool {
        let n = self.offsets.len();
        let data = binary.data_mut();
        for _ in 0..n {
            let index = self
                .index_binary
                .wrapping_add_signed(self.offset_binary[self.dir]);
            if data[index] == 1 {
                return true;
            }
            data[index] = MARKED;
            self.dir = (self.dir + 1) % n;
        }
        false
    }

    /// Step the cursor to the neighbour in direction `dir`.
    fn move_to_found(&mut self, binary: &Gray<u8>) {
        self.index_binary = self
            .index_binary
            .wrapping_add_signed(self.offset_binary[self.dir]);
        self.index_label = self
            .index_label
            .wrapping_add_signed(self.offset_label[self.dir]);

        let a = self.index_binary - binary.offset();
        self.x = a % binary.stride();
        self.y = a / binary.stride();
    }
}

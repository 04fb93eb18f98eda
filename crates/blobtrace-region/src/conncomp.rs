//! Connected component labeling by contour tracing
//!
//! [`LinearContourLabeler`] labels every connected component of a binary
//! image in a single raster scan (Chang, Chen & Lu, "A linear-time
//! component-labeling algorithm using contour tracing technique", 2004).
//! While scanning, the outer border and every hole border of each
//! component are traced and stored in a shared [`PackedSets`].
//!
//! # Algorithm
//!
//! The input is copied into a working image with a one pixel background
//! frame. For each foreground pixel `P`, in raster order:
//!
//! 1. `P` is unlabeled and the pixel above is background: `P` starts the
//!    outer border of a new component, which is traced and labeled.
//! 2. The pixel below is unvisited background: `P` lies on a hole border
//!    not traced yet. It is traced with the label of `P` (or of its left
//!    neighbour if `P` has none yet).
//! 3. Otherwise `P` is an interior pixel and takes the label of its left
//!    neighbour.
//!
//! Tracing marks examined background pixels, so every hole border is found
//! exactly once.

use crate::ccbord::{ContourTracer, TraceTarget};
use crate::error::{RegionError, RegionResult};
use blobtrace_core::{Gray, GrayImage, PackedSets, Point2D};
use log::{debug, trace};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Number of neighbours examined around a pixel (4 or 8).
    pub fn neighbors(self) -> u32 {
        match self {
            ConnectivityType::FourWay => 4,
            ConnectivityType::EightWay => 8,
        }
    }
}

impl TryFrom<u32> for ConnectivityType {
    type Error = RegionError;

    fn try_from(value: u32) -> RegionResult<Self> {
        match value {
            4 => Ok(ConnectivityType::FourWay),
            8 => Ok(ConnectivityType::EightWay),
            other => Err(RegionError::InvalidConnectivity(other)),
        }
    }
}

/// Contours of one component, as set indices into the packed point storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContourPacked {
    /// Component id, equal to its label in the label image
    pub id: usize,
    /// Set holding the outer border
    pub external_index: usize,
    /// Sets holding the hole borders, in discovery order
    pub internal_indexes: Vec<usize>,
}

impl ContourPacked {
    /// Create a descriptor without holes.
    pub fn new(id: usize, external_index: usize) -> Self {
        Self {
            id,
            external_index,
            internal_indexes: Vec::new(),
        }
    }

    /// Reset to the empty state, keeping the allocation of the hole list.
    pub fn reset(&mut self) {
        self.id = 0;
        self.external_index = 0;
        self.internal_indexes.clear();
    }
}

/// Contours of one component, copied out of the packed storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentContours {
    /// Component id, equal to its label in the label image
    pub id: usize,
    /// Outer border points
    pub external: Vec<Point2D>,
    /// Hole border points, one list per hole
    pub internal: Vec<Vec<Point2D>>,
}

/// Options for contour labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourOptions {
    /// Connectivity of foreground components
    pub connectivity: ConnectivityType,
    /// Contours with fewer points are not stored
    pub min_contour_size: usize,
    /// Contours with this many points or more are not stored
    pub max_contour_size: usize,
    /// Store hole borders
    pub save_internal_contours: bool,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::FourWay,
            min_contour_size: 0,
            max_contour_size: usize::MAX,
            save_internal_contours: true,
        }
    }
}

impl ContourOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the minimum stored contour size
    pub fn with_min_contour_size(mut self, min: usize) -> Self {
        self.min_contour_size = min;
        self
    }

    /// Set the maximum stored contour size (exclusive)
    pub fn with_max_contour_size(mut self, max: usize) -> Self {
        self.max_contour_size = max;
        self
    }

    /// Choose whether hole borders are stored
    pub fn with_save_internal_contours(mut self, save: bool) -> Self {
        self.save_internal_contours = save;
        self
    }

    /// Check the options for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if
    /// `min_contour_size > max_contour_size`.
    pub fn validate(&self) -> RegionResult<()> {
        if self.min_contour_size > self.max_contour_size {
            return Err(RegionError::InvalidParameters(format!(
                "min contour size {} exceeds max contour size {}",
                self.min_contour_size, self.max_contour_size
            )));
        }
        Ok(())
    }
}

/// Single pass component labeler with contour extraction.
///
/// The labeler keeps its working image, point storage and contour list
/// between calls, so processing many images of similar size does not
/// allocate after the first one.
///
/// # Examples
///
/// ```
/// use blobtrace_core::{Gray, GrayImage};
/// use blobtrace_region::{ConnectivityType, LinearContourLabeler};
///
/// let binary = Gray::from_rows(&[
///     [1u8, 1, 0, 0],
///     [1, 1, 0, 1],
/// ])
/// .unwrap();
/// let mut labeled = Gray::new(0, 0);
///
/// let mut labeler = LinearContourLabeler::new(ConnectivityType::FourWay);
/// labeler.process(&binary, &mut labeled).unwrap();
///
/// assert_eq!(labeler.contours().len(), 2);
/// assert_eq!(labeled.to_rows(), vec![vec![1, 1, 0, 0], vec![1, 1, 0, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearContourLabeler {
    options: ContourOptions,
    /// Input copy with a one pixel background frame
    border: Gray<u8>,
    packed_points: PackedSets<Point2D>,
    contours: Vec<ContourPacked>,
    tracer4: ContourTracer,
    tracer8: ContourTracer,
}

impl LinearContourLabeler {
    /// Create a labeler with default options and the given connectivity.
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self::build(ContourOptions::new(connectivity))
    }

    /// Create a labeler from options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are inconsistent.
    pub fn with_options(options: ContourOptions) -> RegionResult<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: ContourOptions) -> Self {
        Self {
            options,
            border: Gray::new(0, 0),
            packed_points: PackedSets::new(),
            contours: Vec::new(),
            tracer4: ContourTracer::new(ConnectivityType::FourWay),
            tracer8: ContourTracer::new(ConnectivityType::EightWay),
        }
    }

    /// Label a binary image and extract the contours of its components.
    ///
    /// # Arguments
    ///
    /// * `binary` - Input image, foreground `1` and background `0`. Not modified.
    /// * `labeled` - Output label image; reshaped to the input size. Background
    ///   is `0`, component `i` (1-based) is labeled `i`.
    ///
    /// Results from a previous call are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the current options are inconsistent.
    pub fn process<I>(&mut self, binary: &I, labeled: &mut Gray<i32>) -> RegionResult<()>
    where
        I: GrayImage<Pixel = u8>,
    {
        self.options.validate()?;
        let (width, height) = (binary.width(), binary.height());

        labeled.reshape(width, height);
        labeled.fill(0);

        self.border.reshape(width + 2, height + 2);
        self.border.fill_border(0, 1);
        self.border.copy_from_at(1, 1, binary)?;

        self.packed_points.clear();
        self.contours.clear();

        let tracer = match self.options.connectivity {
            ConnectivityType::FourWay => &mut self.tracer4,
            ConnectivityType::EightWay => &mut self.tracer8,
        };
        let mut scan = Scan {
            options: self.options,
            tracer,
            contours: &mut self.contours,
            target: TraceTarget {
                binary: &mut self.border,
                labeled,
                points: &mut self.packed_points,
            },
        };
        scan.run();

        debug!(
            "labeled {}x{} image: {} components, {} contour sets, {} points",
            width,
            height,
            self.contours.len(),
            self.packed_points.number_of_sets(),
            self.packed_points.total_elements()
        );
        Ok(())
    }

    /// Component descriptors from the last [`process`](Self::process) call,
    /// ordered by id.
    pub fn contours(&self) -> &[ContourPacked] {
        &self.contours
    }

    /// Point storage referenced by [`contours`](Self::contours).
    pub fn packed_points(&self) -> &PackedSets<Point2D> {
        &self.packed_points
    }

    /// Mutable point storage, e.g. for in-place contour smoothing.
    pub fn packed_points_mut(&mut self) -> &mut PackedSets<Point2D> {
        &mut self.packed_points
    }

    /// Copy the points of one contour set into `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set_index` does not name a stored set.
    pub fn load_contour(&self, set_index: usize, output: &mut Vec<Point2D>) -> RegionResult<()> {
        self.packed_points.load_set(set_index, output)?;
        Ok(())
    }

    /// Overwrite the points of one contour set.
    ///
    /// # Errors
    ///
    /// Returns an error if `set_index` is invalid or `points` differs in
    /// length from the stored set.
    pub fn write_contour(&mut self, set_index: usize, points: &[Point2D]) -> RegionResult<()> {
        self.packed_points.write_set(set_index, points)?;
        Ok(())
    }

    /// Copy all contours out of the packed storage, one entry per component.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor refers to a missing set, which only
    /// happens if the storage was cleared through
    /// [`packed_points_mut`](Self::packed_points_mut).
    pub fn component_contours(&self) -> RegionResult<Vec<ComponentContours>> {
        self.contours
            .iter()
            .map(|c| {
                let mut external = Vec::new();
                self.load_contour(c.external_index, &mut external)?;
                let internal = c
                    .internal_indexes
                    .iter()
                    .map(|&i| {
                        let mut points = Vec::new();
                        self.load_contour(i, &mut points).map(|_| points)
                    })
                    .collect::<RegionResult<Vec<_>>>()?;
                Ok(ComponentContours {
                    id: c.id,
                    external,
                    internal,
                })
            })
            .collect()
    }

    /// Current options.
    pub fn options(&self) -> &ContourOptions {
        &self.options
    }

    /// Connectivity rule.
    pub fn connectivity(&self) -> ConnectivityType {
        self.options.connectivity
    }

    /// Set the connectivity rule.
    pub fn set_connectivity(&mut self, connectivity: ConnectivityType) {
        self.options.connectivity = connectivity;
    }

    /// Minimum stored contour size.
    pub fn min_contour_size(&self) -> usize {
        self.options.min_contour_size
    }

    /// Set the minimum stored contour size.
    pub fn set_min_contour_size(&mut self, min: usize) {
        self.options.min_contour_size = min;
    }

    /// Maximum stored contour size (exclusive).
    pub fn max_contour_size(&self) -> usize {
        self.options.max_contour_size
    }

    /// Set the maximum stored contour size (exclusive).
    pub fn set_max_contour_size(&mut self, max: usize) {
        self.options.max_contour_size = max;
    }

    /// Whether hole borders are stored.
    pub fn save_internal_contours(&self) -> bool {
        self.options.save_internal_contours
    }

    /// Choose whether hole borders are stored.
    pub fn set_save_internal_contours(&mut self, save: bool) {
        self.options.save_internal_contours = save;
    }
}

impl Default for LinearContourLabeler {
    fn default() -> Self {
        Self::build(ContourOptions::default())
    }
}

/// Borrowed state of one raster scan.
struct Scan<'a> {
    options: ContourOptions,
    tracer: &'a mut ContourTracer,
    contours: &'a mut Vec<ContourPacked>,
    target: TraceTarget<'a>,
}

impl Scan<'_> {
    fn run(&mut self) {
        let (bw, bh) = (self.target.binary.width(), self.target.binary.height());
        let (stride_in, offset_in) = (self.target.binary.stride(), self.target.binary.offset());
        let (stride_out, offset_out) = (self.target.labeled.stride(), self.target.labeled.offset());

        for y in 1..bh - 1 {
            for x in 1..bw - 1 {
                let index_in = offset_in + y * stride_in + x;
                if self.target.binary.data()[index_in] != 1 {
                    continue;
                }
                let index_out = offset_out + (y - 1) * stride_out + (x - 1);
                let mut label = self.target.labeled.data()[index_out];
                let mut handled = false;

                // new outer border
                if label == 0 && self.target.binary.data()[index_in - stride_in] != 1 {
                    self.contours.push(ContourPacked::new(
                        self.contours.len() + 1,
                        self.target.points.number_of_sets(),
                    ));
                    label = self.contours.len() as i32;
                    self.target.points.start_new_set();
                    self.tracer.set_max_contour_size(self.options.max_contour_size);
                    self.tracer.trace(&mut self.target, label, x, y, true);
                    self.filter_tail(label, true);
                    handled = true;
                }

                // new hole border
                if self.target.binary.data()[index_in + stride_in] == 0 {
                    if label == 0 {
                        label = self.target.labeled.data()[index_out - 1];
                    }
                    let set = self.target.points.number_of_sets();
                    self.contours[label as usize - 1].internal_indexes.push(set);
                    self.target.points.start_new_set();
                    let max = if self.options.save_internal_contours {
                        self.options.max_contour_size
                    } else {
                        0
                    };
                    self.tracer.set_max_contour_size(max);
                    self.tracer.trace(&mut self.target, label, x, y, false);
                    self.filter_tail(label, false);
                    handled = true;
                }

                // interior pixel
                if !handled {
                    let labels = self.target.labeled.data_mut();
                    if labels[index_out] == 0 {
                        labels[index_out] = labels[index_out - 1];
                    }
                }
            }
        }
    }

    /// Empty the tail set if its size is outside the configured range.
    ///
    /// The set itself stays so the descriptor indices remain valid.
    fn filter_tail(&mut self, label: i32, external: bool) {
        let size = self.target.points.size_of_tail();
        if size >= self.options.max_contour_size || size < self.options.min_contour_size {
            trace!(
                "discarding {} contour of component {} with {} points",
                if external { "external" } else { "internal" },
                label,
                size
            );
            self.target.points.remove_tail();
            self.target.points.start_new_set();
        }
    }
}

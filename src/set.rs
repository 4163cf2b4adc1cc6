//! Group finite element sets and the rules by which they own or share their buffers.
use crate::dimensions::{restricted_dimensions, Dimensions, DofMask};
use crate::edges::Edge;
use crate::error::{GroupFemError, OwnershipWarning};
use crate::sparse::{MatrixFormat, SparseLayout};
use crate::storage::{Buffer, BufferHandle, ResizePolicy, Shape};
use crate::{DataType, FemScalar};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign, Index, IndexMut, Range};

/// How coefficients are organized.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssemblyKind {
    #[default]
    Undefined,
    /// One coefficient stack per stored matrix entry.
    NodeBased,
    /// One coefficient stack per equation (diagonal) and one pair of stacks per edge.
    EdgeBased,
}

/// The categories of data a set holds. Ownership, presence and duplication are tracked per
/// category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataCategory {
    /// Scalar description: assembly kind, format, dimensions.
    Structure,
    /// Edge list and edge-group index.
    EdgeStructure,
    /// Node coefficients.
    NodeData,
    /// Edge coefficients.
    EdgeData,
}

impl DataCategory {
    pub const ALL: [DataCategory; 4] = [
        DataCategory::Structure,
        DataCategory::EdgeStructure,
        DataCategory::NodeData,
        DataCategory::EdgeData,
    ];

    fn bit(self) -> u8 {
        match self {
            DataCategory::Structure => 1,
            DataCategory::EdgeStructure => 2,
            DataCategory::NodeData => 4,
            DataCategory::EdgeData => 8,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ownership {
    /// The set manages the data exclusively and frees it on release.
    #[default]
    Owned,
    /// The data belongs to another set; this set never frees, resizes or regenerates it.
    Aliased,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    Present,
    #[default]
    Absent,
}

/// One value per [`DataCategory`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap<V> {
    structure: V,
    edge_structure: V,
    node_data: V,
    edge_data: V,
}

impl<V> Index<DataCategory> for CategoryMap<V> {
    type Output = V;

    fn index(&self, category: DataCategory) -> &V {
        match category {
            DataCategory::Structure => &self.structure,
            DataCategory::EdgeStructure => &self.edge_structure,
            DataCategory::NodeData => &self.node_data,
            DataCategory::EdgeData => &self.edge_data,
        }
    }
}

impl<V> IndexMut<DataCategory> for CategoryMap<V> {
    fn index_mut(&mut self, category: DataCategory) -> &mut V {
        match category {
            DataCategory::Structure => &mut self.structure,
            DataCategory::EdgeStructure => &mut self.edge_structure,
            DataCategory::NodeData => &mut self.node_data,
            DataCategory::EdgeData => &mut self.edge_data,
        }
    }
}

/// Selection of the categories affected by a copy or duplication.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuplicationMask {
    bits: u8,
}

impl DuplicationMask {
    pub const NONE: Self = Self { bits: 0 };
    pub const STRUCTURE: Self = Self { bits: 1 };
    pub const EDGE_STRUCTURE: Self = Self { bits: 2 };
    pub const NODE_DATA: Self = Self { bits: 4 };
    pub const EDGE_DATA: Self = Self { bits: 8 };
    pub const ALL: Self = Self { bits: 15 };

    pub fn contains(self, category: DataCategory) -> bool {
        self.bits & category.bit() != 0
    }

    pub fn categories(self) -> impl Iterator<Item = DataCategory> {
        DataCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl Default for DuplicationMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<DataCategory> for DuplicationMask {
    fn from(category: DataCategory) -> Self {
        Self { bits: category.bit() }
    }
}

impl BitOr for DuplicationMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for DuplicationMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// Options for [`GroupFemSet::copy_from`] and [`GroupFemSet::duplicate_from`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptions {
    /// Categories to transfer. Defaults to all categories.
    pub mask: DuplicationMask,
    /// Keep the destination's data in unmasked categories. By default the destination is
    /// released before the transfer.
    pub preserve: bool,
}

impl TransferOptions {
    pub fn new(mask: DuplicationMask) -> Self {
        Self { mask, preserve: false }
    }

    pub fn preserving(mut self) -> Self {
        self.preserve = true;
        self
    }
}

/// Direct description of a set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetLayout {
    pub assembly: AssemblyKind,
    pub dimensions: Dimensions,
    /// Interleaved variables per equation. Defaults to 1.
    pub nvar: usize,
    pub ncoeffs_at_node: usize,
    pub ncoeffs_at_edge: usize,
}

impl Default for SetLayout {
    fn default() -> Self {
        Self {
            assembly: AssemblyKind::Undefined,
            dimensions: Dimensions::default(),
            nvar: 1,
            ncoeffs_at_node: 0,
            ncoeffs_at_edge: 0,
        }
    }
}

/// Options for [`GroupFemSet::from_matrix`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixInitOptions {
    pub assembly: AssemblyKind,
    pub ncoeffs_at_node: usize,
    pub ncoeffs_at_edge: usize,
    /// Restrict the set to these degrees of freedom. Defaults to all degrees of freedom.
    pub dofs: Option<Vec<usize>>,
}

/// The degrees of freedom the structure of a set was derived for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum DofScope {
    /// The set was described directly, any restriction is accepted (and then recorded).
    #[default]
    Unknown,
    Full,
    Restricted(Vec<usize>),
}

impl DofScope {
    pub(crate) fn from_mask(mask: Option<&DofMask>) -> Self {
        match mask {
            None => DofScope::Full,
            Some(mask) => DofScope::Restricted(mask.dofs().to_vec()),
        }
    }

    pub(crate) fn admits(&self, mask: Option<&DofMask>) -> bool {
        match (self, mask) {
            (DofScope::Unknown, _) => true,
            (DofScope::Full, None) => true,
            (DofScope::Restricted(dofs), Some(mask)) => dofs.as_slice() == mask.dofs(),
            _ => false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TransferMode {
    Copy,
    Duplicate,
}

/// A bundle of group finite element assembly data.
///
/// The set holds four buffers: the edge-group index, the edge list, the node coefficients and
/// the edge coefficients. Each buffer is either owned by the set or aliased from another set
/// (see [`Ownership`]); an aliased buffer is never freed, resized or regenerated through this set
/// and becomes unavailable once its owner releases it.
///
/// Node-based sets store coefficients with shape `(ncoeffs_at_node, NA)`. Edge-based sets store
/// node coefficients with shape `(ncoeffs_at_node, NEQ)` and edge coefficients with shape
/// `(ncoeffs_at_edge, 2, NEDGE)`, the middle index selecting the `ij` or `ji` entry of the edge.
#[derive(Debug)]
pub struct GroupFemSet<T: FemScalar = f64> {
    pub(crate) assembly: AssemblyKind,
    pub(crate) format: Option<MatrixFormat>,
    pub(crate) ownership: CategoryMap<Ownership>,
    pub(crate) presence: CategoryMap<Presence>,
    pub(crate) dimensions: Dimensions,
    pub(crate) nvar: usize,
    pub(crate) ncoeffs_at_node: usize,
    pub(crate) ncoeffs_at_edge: usize,
    pub(crate) dof_scope: DofScope,
    pub(crate) edge_group_offsets: Option<BufferHandle<usize>>,
    pub(crate) edge_list: Option<BufferHandle<Edge>>,
    pub(crate) node_coefficients: Option<BufferHandle<T>>,
    pub(crate) edge_coefficients: Option<BufferHandle<T>>,
}

impl<T: FemScalar> Default for GroupFemSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FemScalar> GroupFemSet<T> {
    /// An empty set without dimensions or buffers.
    pub fn new() -> Self {
        Self {
            assembly: AssemblyKind::Undefined,
            format: None,
            ownership: CategoryMap::default(),
            presence: CategoryMap::default(),
            dimensions: Dimensions::default(),
            nvar: 1,
            ncoeffs_at_node: 0,
            ncoeffs_at_edge: 0,
            dof_scope: DofScope::Unknown,
            edge_group_offsets: None,
            edge_list: None,
            node_coefficients: None,
            edge_coefficients: None,
        }
    }

    /// Creates a set from a direct description and allocates its coefficient buffers.
    pub fn from_layout(layout: SetLayout) -> Result<Self, GroupFemError> {
        let mut set = Self::new();
        set.assembly = layout.assembly;
        set.dimensions = layout.dimensions;
        set.nvar = layout.nvar;
        set.presence[DataCategory::Structure] = Presence::Present;
        // A fresh set owns every category, so allocation cannot be refused
        let warnings = set.allocate_coefficients(layout.ncoeffs_at_node, layout.ncoeffs_at_edge)?;
        debug_assert!(warnings.is_empty());
        Ok(set)
    }

    /// Creates a set whose dimensions are derived from a matrix, optionally restricted to a subset
    /// of its degrees of freedom.
    pub fn from_matrix<L>(source: &L, options: &MatrixInitOptions) -> Result<Self, GroupFemError>
    where
        L: ?Sized + SparseLayout,
    {
        let mask = options
            .dofs
            .as_deref()
            .map(|dofs| DofMask::for_layout(source, dofs))
            .transpose()?;
        let dimensions = match &mask {
            None => Dimensions::symmetric(source.nnz(), source.nrows()),
            Some(mask) => restricted_dimensions(source, mask),
        };

        let mut set = Self::from_layout(SetLayout {
            assembly: options.assembly,
            dimensions,
            nvar: source.nvar(),
            ncoeffs_at_node: options.ncoeffs_at_node,
            ncoeffs_at_edge: options.ncoeffs_at_edge,
        })?;
        set.format = Some(source.format());
        set.dof_scope = DofScope::from_mask(mask.as_ref());
        Ok(set)
    }

    pub fn assembly(&self) -> AssemblyKind {
        self.assembly
    }

    pub fn format(&self) -> Option<MatrixFormat> {
        self.format
    }

    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn na(&self) -> usize {
        self.dimensions.na
    }

    pub fn neq(&self) -> usize {
        self.dimensions.neq
    }

    pub fn nedge(&self) -> usize {
        self.dimensions.nedge
    }

    pub fn nvar(&self) -> usize {
        self.nvar
    }

    pub fn ncoeffs_at_node(&self) -> usize {
        self.ncoeffs_at_node
    }

    pub fn ncoeffs_at_edge(&self) -> usize {
        self.ncoeffs_at_edge
    }

    pub fn ownership(&self, category: DataCategory) -> Ownership {
        self.ownership[category]
    }

    pub fn presence(&self, category: DataCategory) -> Presence {
        self.presence[category]
    }

    pub fn has(&self, category: DataCategory) -> bool {
        self.presence[category] == Presence::Present
    }

    /// Marks data as valid, e.g. after a consumer filled a coefficient buffer itself.
    pub fn mark_present(&mut self, category: DataCategory) {
        self.presence[category] = Presence::Present;
    }

    pub fn mark_absent(&mut self, category: DataCategory) {
        self.presence[category] = Presence::Absent;
    }

    /// The degrees of freedom the structure is restricted to, if it was derived with a restriction.
    pub fn dof_restriction(&self) -> Option<&[usize]> {
        match &self.dof_scope {
            DofScope::Restricted(dofs) => Some(dofs),
            _ => None,
        }
    }

    pub(crate) fn is_aliased(&self, category: DataCategory) -> bool {
        self.ownership[category] == Ownership::Aliased
    }

    /// Extent of the node coefficient buffer for the current assembly kind.
    pub(crate) fn node_extent(&self) -> Option<usize> {
        match self.assembly {
            AssemblyKind::Undefined => None,
            AssemblyKind::NodeBased => Some(self.dimensions.na),
            AssemblyKind::EdgeBased => Some(self.dimensions.neq),
        }
    }

    /// Allocates the coefficient buffers for the given multiplicities.
    ///
    /// Zero multiplicities allocate nothing. Existing owned buffers are replaced by fresh ones
    /// (and their data marked absent), aliased buffers are left untouched and reported.
    /// Edge coefficients only exist for edge-based sets.
    pub fn allocate_coefficients(
        &mut self,
        ncoeffs_at_node: usize,
        ncoeffs_at_edge: usize,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError> {
        let mut warnings = Vec::new();
        if ncoeffs_at_node == 0 && ncoeffs_at_edge == 0 {
            return Ok(warnings);
        }
        let node_extent = self
            .node_extent()
            .ok_or(GroupFemError::UnsupportedAssemblyKind(self.assembly))?;

        if ncoeffs_at_node > 0 {
            if self.is_aliased(DataCategory::NodeData) {
                warnings.push(OwnershipWarning::emit(DataCategory::NodeData, "coefficient allocation"));
            } else {
                let buffer = Buffer::allocate("CoeffsAtNode", Shape::matrix(ncoeffs_at_node, node_extent));
                self.node_coefficients = Some(BufferHandle::Owned(buffer));
                self.ncoeffs_at_node = ncoeffs_at_node;
                self.presence[DataCategory::NodeData] = Presence::Absent;
            }
        }

        if ncoeffs_at_edge > 0 {
            if self.assembly != AssemblyKind::EdgeBased {
                log::debug!("Ignoring edge coefficients requested for {:?} set", self.assembly);
            } else if self.is_aliased(DataCategory::EdgeData) {
                warnings.push(OwnershipWarning::emit(DataCategory::EdgeData, "coefficient allocation"));
            } else {
                let shape = Shape::tensor3(ncoeffs_at_edge, 2, self.dimensions.nedge);
                self.edge_coefficients = Some(BufferHandle::Owned(Buffer::allocate("CoeffsAtEdge", shape)));
                self.ncoeffs_at_edge = ncoeffs_at_edge;
                self.presence[DataCategory::EdgeData] = Presence::Absent;
            }
        }

        Ok(warnings)
    }

    /// Changes the dimensions of the set.
    ///
    /// Owned buffers whose extent depends on a changed dimension are reallocated without
    /// preserving their content and their data is marked absent. Aliased buffers keep their size
    /// and are reported. A set with aliased structure is not resized at all.
    pub fn resize(&mut self, dimensions: Dimensions) -> Vec<OwnershipWarning> {
        if self.is_aliased(DataCategory::Structure) {
            return vec![OwnershipWarning::emit(DataCategory::Structure, "resize")];
        }

        let mut warnings = Vec::new();
        let previous = std::mem::replace(&mut self.dimensions, dimensions);

        let node_extent_changed = match self.assembly {
            AssemblyKind::Undefined => false,
            AssemblyKind::NodeBased => previous.na != dimensions.na,
            AssemblyKind::EdgeBased => previous.neq != dimensions.neq,
        };
        if let (true, Some(extent)) = (node_extent_changed, self.node_extent()) {
            resize_buffer(
                &self.node_coefficients,
                self.ownership[DataCategory::NodeData],
                &mut self.presence[DataCategory::NodeData],
                DataCategory::NodeData,
                extent,
                &mut warnings,
            );
        }

        if previous.nedge != dimensions.nedge {
            resize_buffer(
                &self.edge_list,
                self.ownership[DataCategory::EdgeStructure],
                &mut self.presence[DataCategory::EdgeStructure],
                DataCategory::EdgeStructure,
                dimensions.nedge,
                &mut warnings,
            );
            resize_buffer(
                &self.edge_coefficients,
                self.ownership[DataCategory::EdgeData],
                &mut self.presence[DataCategory::EdgeData],
                DataCategory::EdgeData,
                dimensions.nedge,
                &mut warnings,
            );
        }

        warnings
    }

    /// Resizes the set to the dimensions derived from a matrix.
    pub fn resize_from_matrix<L>(
        &mut self,
        source: &L,
        dofs: Option<&[usize]>,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError>
    where
        L: ?Sized + SparseLayout,
    {
        let mask = dofs.map(|dofs| DofMask::for_layout(source, dofs)).transpose()?;
        let dimensions = match &mask {
            None => Dimensions::symmetric(source.nnz(), source.nrows()),
            Some(mask) => restricted_dimensions(source, mask),
        };
        let warnings = self.resize(dimensions);
        if !self.is_aliased(DataCategory::Structure) {
            self.nvar = source.nvar();
            self.format = Some(source.format());
            self.dof_scope = DofScope::from_mask(mask.as_ref());
        }
        Ok(warnings)
    }

    /// Frees all owned buffers, forgets aliased ones and resets the set to its empty state.
    ///
    /// Releasing an empty set has no effect.
    pub fn release(&mut self) {
        *self = Self::new();
    }

    /// Makes this set an independent copy of the masked categories of `source`.
    ///
    /// Content of masked buffers is deep-copied into buffers owned by this set, so later
    /// modifications of either set are not visible in the other.
    pub fn copy_from(&mut self, source: &Self, options: &TransferOptions) {
        self.transfer(source, options, TransferMode::Copy);
    }

    /// Makes this set share the masked buffers of `source`.
    ///
    /// This set receives non-owning aliases: modifications through either set are visible in
    /// both, and `source` stays responsible for the buffers. Once `source` releases or replaces a
    /// buffer, the alias resolves to nothing.
    pub fn duplicate_from(&mut self, source: &Self, options: &TransferOptions) {
        self.transfer(source, options, TransferMode::Duplicate);
    }

    fn transfer(&mut self, source: &Self, options: &TransferOptions, mode: TransferMode) {
        if !options.preserve {
            self.release();
        }
        let ownership = match mode {
            TransferMode::Copy => Ownership::Owned,
            TransferMode::Duplicate => Ownership::Aliased,
        };

        for category in options.mask.categories() {
            self.ownership[category] = ownership;
            match category {
                DataCategory::Structure => {
                    self.assembly = source.assembly;
                    self.format = source.format;
                    self.dimensions = source.dimensions;
                    self.nvar = source.nvar;
                    self.dof_scope = source.dof_scope.clone();
                    self.presence[category] = source.presence[category];
                }
                DataCategory::EdgeStructure => {
                    self.edge_list = transfer_handle(&source.edge_list, mode);
                    self.edge_group_offsets = transfer_handle(&source.edge_group_offsets, mode);
                    self.presence[category] = resolved_presence(&self.edge_list, source.presence[category]);
                }
                DataCategory::NodeData => {
                    self.node_coefficients = transfer_handle(&source.node_coefficients, mode);
                    self.ncoeffs_at_node = source.ncoeffs_at_node;
                    self.presence[category] = resolved_presence(&self.node_coefficients, source.presence[category]);
                }
                DataCategory::EdgeData => {
                    self.edge_coefficients = transfer_handle(&source.edge_coefficients, mode);
                    self.ncoeffs_at_edge = source.ncoeffs_at_edge;
                    self.presence[category] = resolved_presence(&self.edge_coefficients, source.presence[category]);
                }
            }
        }
    }

    /// The edge list, if allocated and alive.
    pub fn edge_list(&self) -> Option<Buffer<Edge>> {
        self.edge_list.as_ref()?.get()
    }

    /// Boundaries of the edge groups: group `k` consists of the edges
    /// `offsets[k] .. offsets[k + 1]`.
    pub fn edge_group_offsets(&self) -> Option<Buffer<usize>> {
        self.edge_group_offsets.as_ref()?.get()
    }

    /// The edge groups as ranges into the edge list.
    pub fn edge_groups(&self) -> Option<Vec<Range<usize>>> {
        let offsets = self.edge_group_offsets()?;
        let offsets = offsets.read();
        Some(
            offsets
                .as_slice()
                .iter()
                .tuple_windows()
                .map(|(&begin, &end)| begin..end)
                .collect(),
        )
    }

    pub fn node_coefficients(&self) -> Option<Buffer<T>> {
        self.node_coefficients.as_ref()?.get()
    }

    pub fn edge_coefficients(&self) -> Option<Buffer<T>> {
        self.edge_coefficients.as_ref()?.get()
    }

    /// Logs a summary of the set at info level.
    pub fn log_info(&self) {
        log::info!("{}", self);
    }
}

fn transfer_handle<E: Clone>(handle: &Option<BufferHandle<E>>, mode: TransferMode) -> Option<BufferHandle<E>> {
    match mode {
        TransferMode::Copy => handle
            .as_ref()
            .and_then(BufferHandle::get)
            .map(|buffer| BufferHandle::Owned(buffer.deep_copy())),
        TransferMode::Duplicate => handle
            .as_ref()
            .map(|handle| BufferHandle::Aliased(handle.alias())),
    }
}

fn resolved_presence<E>(handle: &Option<BufferHandle<E>>, presence: Presence) -> Presence {
    match handle.as_ref().and_then(BufferHandle::get) {
        Some(_) => presence,
        None => Presence::Absent,
    }
}

fn resize_buffer<E: Clone + Default>(
    handle: &Option<BufferHandle<E>>,
    ownership: Ownership,
    presence: &mut Presence,
    category: DataCategory,
    extent: usize,
    warnings: &mut Vec<OwnershipWarning>,
) {
    match (handle, ownership) {
        (None, _) => {}
        (Some(_), Ownership::Aliased) | (Some(BufferHandle::Aliased(_)), _) => {
            warnings.push(OwnershipWarning::emit(category, "resize"));
        }
        (Some(BufferHandle::Owned(buffer)), Ownership::Owned) => {
            buffer.resize(extent, ResizePolicy::Discard);
            *presence = Presence::Absent;
        }
    }
}

fn describe_buffer<E>(handle: &Option<BufferHandle<E>>) -> String {
    match handle {
        None => "none".to_string(),
        Some(handle) => match handle.get() {
            Some(buffer) => buffer.shape().to_string(),
            None => "released by owner".to_string(),
        },
    }
}

impl<T: FemScalar> fmt::Display for GroupFemSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GroupFemSet:")?;
        writeln!(f, "  assembly kind:     {:?}", self.assembly)?;
        match self.format {
            Some(format) => writeln!(f, "  matrix format:     {:?}", format)?,
            None => writeln!(f, "  matrix format:     undefined")?,
        }
        writeln!(f, "  data type:         {:?}", self.data_type())?;
        writeln!(
            f,
            "  NA/NEQ/NEDGE/NVAR: {}/{}/{}/{}",
            self.dimensions.na, self.dimensions.neq, self.dimensions.nedge, self.nvar
        )?;
        writeln!(f, "  ncoeffsAtNode:     {}", self.ncoeffs_at_node)?;
        writeln!(f, "  ncoeffsAtEdge:     {}", self.ncoeffs_at_edge)?;
        if let Some(dofs) = self.dof_restriction() {
            writeln!(f, "  restricted to:     {} dofs", dofs.len())?;
        }
        for category in DataCategory::ALL {
            writeln!(
                f,
                "  {:<18} {:?}, {:?}",
                format!("{:?}:", category),
                self.ownership[category],
                self.presence[category]
            )?;
        }
        writeln!(f, "  edge groups:       {}", describe_buffer(&self.edge_group_offsets))?;
        writeln!(f, "  edge list:         {}", describe_buffer(&self.edge_list))?;
        writeln!(f, "  node coefficients: {}", describe_buffer(&self.node_coefficients))?;
        write!(f, "  edge coefficients: {}", describe_buffer(&self.edge_coefficients))
    }
}

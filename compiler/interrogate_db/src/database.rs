//! The record store.

use std::collections::BTreeMap;

use crate::{
    ElementIndex, FunctionIndex, Index, IndexRemapper, InterrogateElement, InterrogateFunction,
    InterrogateFunctionWrapper, InterrogateMakeSeq, InterrogateManifest, InterrogateType,
    MakeSeqIndex, ManifestIndex, TypeIndex, WrapperIndex,
};

static EMPTY_TYPE: InterrogateType = InterrogateType::EMPTY;
static EMPTY_FUNCTION: InterrogateFunction = InterrogateFunction::EMPTY;
static EMPTY_WRAPPER: InterrogateFunctionWrapper = InterrogateFunctionWrapper::EMPTY;
static EMPTY_MANIFEST: InterrogateManifest = InterrogateManifest::EMPTY;
static EMPTY_ELEMENT: InterrogateElement = InterrogateElement::EMPTY;
static EMPTY_MAKE_SEQ: InterrogateMakeSeq = InterrogateMakeSeq::EMPTY;

/// Every exported record of one library, keyed by index.
///
/// Maps are ordered so that renumbering, and anything that walks the
/// records, is deterministic.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateDatabase {
    next_index: u32,
    types: BTreeMap<TypeIndex, InterrogateType>,
    functions: BTreeMap<FunctionIndex, InterrogateFunction>,
    wrappers: BTreeMap<WrapperIndex, InterrogateFunctionWrapper>,
    manifests: BTreeMap<ManifestIndex, InterrogateManifest>,
    elements: BTreeMap<ElementIndex, InterrogateElement>,
    make_seqs: BTreeMap<MakeSeqIndex, InterrogateMakeSeq>,

    global_types: Vec<TypeIndex>,
    all_types: Vec<TypeIndex>,
    global_functions: Vec<FunctionIndex>,
    all_functions: Vec<FunctionIndex>,
    global_manifests: Vec<ManifestIndex>,
    global_elements: Vec<ElementIndex>,
}

impl InterrogateDatabase {
    pub fn new() -> Self {
        InterrogateDatabase {
            next_index: 1,
            types: BTreeMap::new(),
            functions: BTreeMap::new(),
            wrappers: BTreeMap::new(),
            manifests: BTreeMap::new(),
            elements: BTreeMap::new(),
            make_seqs: BTreeMap::new(),
            global_types: Vec::new(),
            all_types: Vec::new(),
            global_functions: Vec::new(),
            all_functions: Vec::new(),
            global_manifests: Vec::new(),
            global_elements: Vec::new(),
        }
    }

    /// A fresh index, never handed out before.
    pub fn next_index(&mut self) -> Index {
        let index = Index::from_raw(self.next_index);
        self.next_index += 1;
        index
    }

    /// The index the next call to [`next_index`](Self::next_index) returns.
    pub fn peek_next_index(&self) -> Index {
        Index::from_raw(self.next_index)
    }

    // === Adding ===

    /// Store a type. A record already at `index` must be a forward
    /// reference; the two are merged.
    pub fn add_type(&mut self, index: TypeIndex, ty: InterrogateType) {
        assert!(index.is_some(), "type added at index 0");
        let global = ty.is_global();
        match self.types.get_mut(&index) {
            Some(old) => {
                debug_assert!(!old.is_fully_defined(), "type {index} defined twice");
                old.merge_with(&ty);
            }
            None => {
                self.types.insert(index, ty);
            }
        }
        if global {
            self.global_types.push(index);
        }
        self.all_types.push(index);
    }

    pub fn add_function(&mut self, index: FunctionIndex, function: InterrogateFunction) {
        assert!(index.is_some(), "function added at index 0");
        let global = function.is_global();
        let previous = self.functions.insert(index, function);
        debug_assert!(previous.is_none(), "function {index} added twice");
        if global {
            self.global_functions.push(index);
        }
        self.all_functions.push(index);
    }

    pub fn add_wrapper(&mut self, index: WrapperIndex, wrapper: InterrogateFunctionWrapper) {
        assert!(index.is_some(), "wrapper added at index 0");
        let previous = self.wrappers.insert(index, wrapper);
        debug_assert!(previous.is_none(), "wrapper {index} added twice");
    }

    pub fn add_manifest(&mut self, index: ManifestIndex, manifest: InterrogateManifest) {
        assert!(index.is_some(), "manifest added at index 0");
        let previous = self.manifests.insert(index, manifest);
        debug_assert!(previous.is_none(), "manifest {index} added twice");
        self.global_manifests.push(index);
    }

    pub fn add_element(&mut self, index: ElementIndex, element: InterrogateElement) {
        assert!(index.is_some(), "element added at index 0");
        let global = element.is_global();
        let previous = self.elements.insert(index, element);
        debug_assert!(previous.is_none(), "element {index} added twice");
        if global {
            self.global_elements.push(index);
        }
    }

    pub fn add_make_seq(&mut self, index: MakeSeqIndex, make_seq: InterrogateMakeSeq) {
        assert!(index.is_some(), "make_seq added at index 0");
        let previous = self.make_seqs.insert(index, make_seq);
        debug_assert!(previous.is_none(), "make_seq {index} added twice");
    }

    /// Drop a type that turned out to be unexportable.
    pub fn remove_type(&mut self, index: TypeIndex) {
        self.types.remove(&index);
        self.global_types.retain(|&t| t != index);
        self.all_types.retain(|&t| t != index);
    }

    /// Mark a type as exported at global scope.
    pub fn mark_type_global(&mut self, index: TypeIndex) {
        if let Some(ty) = self.types.get_mut(&index) {
            if !ty.is_global() {
                ty.flags |= crate::TypeFlags::GLOBAL;
                self.global_types.push(index);
            }
        }
    }

    // === Reading ===

    pub fn has_type(&self, index: TypeIndex) -> bool {
        self.types.contains_key(&index)
    }

    pub fn has_function(&self, index: FunctionIndex) -> bool {
        self.functions.contains_key(&index)
    }

    /// The type at `index`, or an empty record.
    pub fn get_type(&self, index: TypeIndex) -> &InterrogateType {
        self.types.get(&index).unwrap_or(&EMPTY_TYPE)
    }

    pub fn get_function(&self, index: FunctionIndex) -> &InterrogateFunction {
        self.functions.get(&index).unwrap_or(&EMPTY_FUNCTION)
    }

    pub fn get_wrapper(&self, index: WrapperIndex) -> &InterrogateFunctionWrapper {
        self.wrappers.get(&index).unwrap_or(&EMPTY_WRAPPER)
    }

    pub fn get_manifest(&self, index: ManifestIndex) -> &InterrogateManifest {
        self.manifests.get(&index).unwrap_or(&EMPTY_MANIFEST)
    }

    pub fn get_element(&self, index: ElementIndex) -> &InterrogateElement {
        self.elements.get(&index).unwrap_or(&EMPTY_ELEMENT)
    }

    pub fn get_make_seq(&self, index: MakeSeqIndex) -> &InterrogateMakeSeq {
        self.make_seqs.get(&index).unwrap_or(&EMPTY_MAKE_SEQ)
    }

    // === Updating ===

    /// The type at `index` for in-place update, created empty if absent.
    pub fn update_type(&mut self, index: TypeIndex) -> &mut InterrogateType {
        assert!(index.is_some(), "update of type 0");
        self.types.entry(index).or_default()
    }

    pub fn update_function(&mut self, index: FunctionIndex) -> &mut InterrogateFunction {
        assert!(index.is_some(), "update of function 0");
        self.functions.entry(index).or_default()
    }

    pub fn update_wrapper(&mut self, index: WrapperIndex) -> &mut InterrogateFunctionWrapper {
        assert!(index.is_some(), "update of wrapper 0");
        self.wrappers.entry(index).or_default()
    }

    pub fn update_manifest(&mut self, index: ManifestIndex) -> &mut InterrogateManifest {
        assert!(index.is_some(), "update of manifest 0");
        self.manifests.entry(index).or_default()
    }

    pub fn update_element(&mut self, index: ElementIndex) -> &mut InterrogateElement {
        assert!(index.is_some(), "update of element 0");
        self.elements.entry(index).or_default()
    }

    pub fn update_make_seq(&mut self, index: MakeSeqIndex) -> &mut InterrogateMakeSeq {
        assert!(index.is_some(), "update of make_seq 0");
        self.make_seqs.entry(index).or_default()
    }

    // === Listings ===

    pub fn global_types(&self) -> &[TypeIndex] {
        &self.global_types
    }

    pub fn all_types(&self) -> &[TypeIndex] {
        &self.all_types
    }

    pub fn global_functions(&self) -> &[FunctionIndex] {
        &self.global_functions
    }

    pub fn all_functions(&self) -> &[FunctionIndex] {
        &self.all_functions
    }

    pub fn global_manifests(&self) -> &[ManifestIndex] {
        &self.global_manifests
    }

    pub fn global_elements(&self) -> &[ElementIndex] {
        &self.global_elements
    }

    pub fn wrappers(&self) -> impl Iterator<Item = (WrapperIndex, &InterrogateFunctionWrapper)> {
        self.wrappers.iter().map(|(&i, w)| (i, w))
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementIndex, &InterrogateElement)> {
        self.elements.iter().map(|(&i, e)| (i, e))
    }

    pub fn make_seqs(&self) -> impl Iterator<Item = (MakeSeqIndex, &InterrogateMakeSeq)> {
        self.make_seqs.iter().map(|(&i, s)| (i, s))
    }

    pub fn num_types(&self) -> usize {
        self.types.len()
    }

    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    pub fn num_wrappers(&self) -> usize {
        self.wrappers.len()
    }

    // === Lookup by name ===

    pub fn type_by_name(&self, name: &str) -> TypeIndex {
        find_index(&self.types, |t| t.name == name)
    }

    pub fn type_by_scoped_name(&self, name: &str) -> TypeIndex {
        find_index(&self.types, |t| t.scoped_name == name)
    }

    pub fn type_by_true_name(&self, name: &str) -> TypeIndex {
        find_index(&self.types, |t| t.true_name == name)
    }

    pub fn function_by_scoped_name(&self, name: &str) -> FunctionIndex {
        find_index(&self.functions, |f| f.scoped_name == name)
    }

    pub fn element_by_scoped_name(&self, name: &str) -> ElementIndex {
        find_index(&self.elements, |e| e.scoped_name == name)
    }

    pub fn manifest_by_name(&self, name: &str) -> ManifestIndex {
        find_index(&self.manifests, |m| m.name == name)
    }

    // === Renumbering ===

    /// Renumber every record from `first`: wrappers first, so they are
    /// consecutive, then functions, types, manifests, elements and
    /// make-seqs. Cross-references and listings are rewritten; anything
    /// that pointed at a missing record becomes 0.
    ///
    /// Returns the mapping so callers can rewrite indices they hold.
    pub fn remap_indices(&mut self, first: u32) -> IndexRemapper {
        let mut remap = IndexRemapper::new();
        let mut next = first;

        self.wrappers = renumber(std::mem::take(&mut self.wrappers), &mut remap, &mut next);
        self.functions = renumber(std::mem::take(&mut self.functions), &mut remap, &mut next);
        self.types = renumber(std::mem::take(&mut self.types), &mut remap, &mut next);
        self.manifests = renumber(std::mem::take(&mut self.manifests), &mut remap, &mut next);
        self.elements = renumber(std::mem::take(&mut self.elements), &mut remap, &mut next);
        self.make_seqs = renumber(std::mem::take(&mut self.make_seqs), &mut remap, &mut next);
        self.next_index = next;

        for wrapper in self.wrappers.values_mut() {
            wrapper.remap_indices(&remap);
        }
        for function in self.functions.values_mut() {
            function.remap_indices(&remap);
        }
        for ty in self.types.values_mut() {
            ty.remap_indices(&remap);
        }
        for manifest in self.manifests.values_mut() {
            manifest.remap_indices(&remap);
        }
        for element in self.elements.values_mut() {
            element.remap_indices(&remap);
        }
        for make_seq in self.make_seqs.values_mut() {
            make_seq.remap_indices(&remap);
        }

        remap.map_all(&mut self.global_types);
        remap.map_all(&mut self.all_types);
        remap.map_all(&mut self.global_functions);
        remap.map_all(&mut self.all_functions);
        remap.map_all(&mut self.global_manifests);
        remap.map_all(&mut self.global_elements);

        tracing::debug!(
            first,
            next = self.next_index,
            wrappers = self.wrappers.len(),
            "remapped database indices"
        );
        remap
    }
}

impl Default for InterrogateDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn find_index<T>(map: &BTreeMap<Index, T>, pred: impl Fn(&T) -> bool) -> Index {
    map.iter()
        .find_map(|(&index, record)| pred(record).then_some(index))
        .unwrap_or(Index::NONE)
}

fn renumber<T>(
    old: BTreeMap<Index, T>,
    remap: &mut IndexRemapper,
    next: &mut u32,
) -> BTreeMap<Index, T> {
    old.into_iter()
        .map(|(index, record)| {
            let new = Index::from_raw(*next);
            *next += 1;
            remap.add_mapping(index, new);
            (new, record)
        })
        .collect()
}

#[cfg(test)]
mod tests;

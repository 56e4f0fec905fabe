use glam::Mat4;
use rustc_hash::FxHashMap;

/// Dense bone index.
///
/// Ids are assigned in first-seen order starting at 0 and stay stable for the
/// lifetime of the [`Skeleton`]; id `i` addresses slot `i` of the output
/// palette and of the shader-side matrix array.
pub type BoneId = usize;

/// Shared bone table: name → dense id, plus one inverse bind matrix per bone.
///
/// Built mutably by the importer and extended by every clip loaded against it,
/// then read immutably each frame by the player. The table only ever grows;
/// an id and its inverse bind matrix are immutable once assigned.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    // Fast lookup from bone name to index
    index_of: FxHashMap<String, BoneId>,

    // Inverse bind matrices, index-aligned with the ids above.
    // Static data: transforms a vertex from mesh space to bone local space.
    inverse_bind: Vec<Mat4>,
}

impl Skeleton {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, assigning the next sequential id if the
    /// bone is unseen.
    ///
    /// The first writer wins: for an already-known bone the passed
    /// `inverse_bind` is ignored, on the assumption that the asset is
    /// internally consistent.
    pub fn get_or_insert(&mut self, name: &str, inverse_bind: Mat4) -> BoneId {
        if let Some(&id) = self.index_of.get(name) {
            log::trace!("bone '{name}' already bound to id {id}, keeping first inverse bind");
            return id;
        }
        let id = self.inverse_bind.len();
        self.index_of.insert(name.to_string(), id);
        self.inverse_bind.push(inverse_bind);
        id
    }

    /// Looks up a bone id without inserting.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<BoneId> {
        self.index_of.get(name).copied()
    }

    /// The inverse bind matrix for `id`, if the bone exists.
    #[inline]
    #[must_use]
    pub fn inverse_bind(&self, id: BoneId) -> Option<&Mat4> {
        self.inverse_bind.get(id)
    }

    /// Number of bones bound so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inverse_bind.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inverse_bind.is_empty()
    }

    /// Iterates `(name, id)` pairs in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, BoneId)> {
        self.index_of.iter().map(|(name, &id)| (name.as_str(), id))
    }
}

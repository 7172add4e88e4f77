use copitrace_types::WorkspaceData;

/// In-memory, read-only view over one extraction batch.
pub struct Corpus {
    data: WorkspaceData,
}

impl Corpus {
    pub fn new(data: WorkspaceData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &WorkspaceData {
        &self.data
    }

    pub fn into_inner(self) -> WorkspaceData {
        self.data
    }
}

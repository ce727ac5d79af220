#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("rendering is already in progress")]
    RenderInProgress,

    #[error(transparent)]
    Renderer(#[from] anyhow::Error),

    #[error("view has no root element")]
    MissingRoot,

    #[error("view has no delegate")]
    MissingDelegate,

    #[error("view has no document source")]
    MissingDocument,
}

pub(crate) mod plane;
pub(crate) mod raster;
pub(crate) mod stencil;

pub(crate) mod layers;
pub(crate) mod sprites;
pub(crate) mod surface;

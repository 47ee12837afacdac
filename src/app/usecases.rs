mod strips;

pub use strips::StripUsecases;

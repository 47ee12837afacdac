mod usecases;

pub use usecases::StripUsecases;

use crate::{
    app::StripUsecases,
    infrastructure::{
        drivers::EspStripDriver,
        services::{RenderWakeService, StripPersistenceService},
    },
};

pub type StripDriver = EspStripDriver<'static>;

pub type StripUsecasesImpl = StripUsecases<RenderWakeService, StripPersistenceService>;

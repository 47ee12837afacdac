#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_storage::FlashStorage;
use log::info;

use fiatlux::app::StripUsecases;
use fiatlux::controllers::{StripHttpController, init_controllers};
use fiatlux::domain::ports::OnBootHandler;
use fiatlux::infrastructure::drivers::{EspFlashStorageDriver, EspStripDriver, start_wifi_sta};
use fiatlux::infrastructure::repositories::FlashStripStorage;
use fiatlux::infrastructure::services::{
    ClockService, RenderWakeService, STRIPS, StripPersistenceService, get_persistence_receiver,
};
use fiatlux::infrastructure::tasks::{
    http_server_task, persistence_task, sntp_task, strip_render_task,
};
use fiatlux::infrastructure::types::StripUsecasesImpl;
use fiatlux::mk_static;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Wi-Fi driver allocations
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("fiatlux: starting");

    // Initialize usecases and controllers
    let usecases = mk_static!(
        StripUsecasesImpl,
        StripUsecases::new(&STRIPS, RenderWakeService, StripPersistenceService)
    );
    let (http_controller, boot_controller) = init_controllers(usecases);

    // Restore strips, then hand flash over to the persistence task
    let mut storage = FlashStripStorage::new(EspFlashStorageDriver::new(FlashStorage::new(
        peripherals.FLASH,
    )));
    boot_controller.on_boot(&mut storage);
    spawner
        .spawn(persistence_task(storage, get_persistence_receiver()))
        .ok();

    // LED output and render loop
    let (pin0, pin1) = fiatlux::strip_pins!(peripherals);
    let driver = EspStripDriver::new(peripherals.RMT, pin0, pin1);
    spawner
        .spawn(strip_render_task(driver, ClockService))
        .ok();

    // Network-dependent tasks
    let stack = start_wifi_sta(spawner, peripherals.WIFI).await;
    let http_controller = mk_static!(StripHttpController, http_controller);
    spawner.spawn(http_server_task(stack, http_controller)).ok();
    spawner.spawn(sntp_task(stack, ClockService)).ok();

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}

use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Runner, Stack, StackResources, StaticConfigV4};
use embassy_time::{Duration, Timer};
use esp_hal::{peripherals::WIFI, rng::Rng};
use esp_radio::wifi::{
    AuthMethod,
    ClientConfig,
    Config,
    ModeConfig,
    WifiController,
    WifiDevice,
    WifiEvent,
    WifiStaState,
};
use heapless::String;
use log::{info, warn};
use static_cell::make_static;

use crate::config;

/// HTTP listener, SNTP and DNS sockets plus headroom
const MAX_NETWORK_CONNECTIONS: usize = 4;

/// Start the Wi-Fi STA (Station) mode
///
/// Returns once the station has a DHCP address. The connection task keeps
/// reconnecting after the link drops.
pub async fn start_wifi_sta(spawner: Spawner, wifi_device: WIFI<'static>) -> Stack<'static> {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().unwrap());
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default()).unwrap();

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = String::from_str(config::DEVICE.hostname).ok();
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = make_static!(StackResources::<{ MAX_NETWORK_CONNECTIONS }>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());

    spawner.spawn(wifi_connection_task(controller)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    let ip = wait_for_connection(stack).await;
    info!("network: connected as {}", ip.address);

    stack
}

/// Background task for connecting to the `WiFi` network and reconnecting if needed
#[embassy_executor::task]
async fn wifi_connection_task(mut controller: WifiController<'static>) {
    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("network: disconnected");
            Timer::after(Duration::from_millis(2000)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = if config::WIFI.password.is_empty() {
                ClientConfig::default()
                    .with_ssid(config::WIFI.ssid.into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(config::WIFI.ssid.into())
                    .with_password(config::WIFI.password.into())
            };
            controller
                .set_config(&ModeConfig::Client(client_config))
                .unwrap();
            controller.start_async().await.unwrap();
        }

        info!("network: connecting to {}", config::WIFI.ssid);
        if let Err(e) = controller.connect_async().await {
            warn!("network: error connecting: {:?}", e);
            Timer::after(Duration::from_millis(5000)).await;
        }
    }
}

#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

async fn wait_for_connection(stack: Stack<'_>) -> StaticConfigV4 {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }
    loop {
        if let Some(config) = stack.config_v4() {
            return config;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}

fn get_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}

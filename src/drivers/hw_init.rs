//! One-shot hardware peripheral initialization.
//!
//! Configures the I²C master (key expander), key input GPIOs, the SPI
//! bus for the LED strip, and the USB device stack using raw ESP-IDF
//! sys calls. Called once from `main()` before the polling loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    I2cInitFailed(i32),
    GpioConfigFailed(i32),
    SpiInitFailed(i32),
    UsbInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cInitFailed(rc) => write!(f, "I2C master init failed (rc={rc})"),
            Self::GpioConfigFailed(rc) => write!(f, "key GPIO config failed (rc={rc})"),
            Self::SpiInitFailed(rc) => write!(f, "LED SPI init failed (rc={rc})"),
            Self::UsbInitFailed(rc) => write!(f, "USB device init failed (rc={rc})"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
const I2C_PORT: i32 = 0;
#[cfg(target_os = "espidf")]
const I2C_TIMEOUT_TICKS: u32 = 100;

// ── I²C master (16-key board: port expander) ──────────────────

#[cfg(target_os = "espidf")]
pub fn init_i2c() -> Result<(), HwInitError> {
    let cfg = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: true,
        scl_pullup_en: true,
        __bindgen_anon_1: i2c_config_t__bindgen_ty_1 {
            master: i2c_config_t__bindgen_ty_1__bindgen_ty_1 {
                clk_speed: pins::I2C_FREQ_HZ,
            },
        },
        ..Default::default()
    };
    // SAFETY: Called once from main() before the polling loop;
    // single-threaded.
    unsafe {
        let ret = i2c_param_config(I2C_PORT, &cfg);
        if ret != ESP_OK {
            return Err(HwInitError::I2cInitFailed(ret));
        }
        let ret = i2c_driver_install(I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0);
        if ret != ESP_OK {
            return Err(HwInitError::I2cInitFailed(ret));
        }
    }
    info!("hw_init: I2C master configured (SDA={}, SCL={})", pins::I2C_SDA_GPIO, pins::I2C_SCL_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_i2c() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): I2C init skipped");
    Ok(())
}

/// Write `wr` then read `rd.len()` bytes from a bus device in one
/// repeated-start transaction.
#[cfg(target_os = "espidf")]
pub fn i2c_write_read(addr: u8, wr: &[u8], rd: &mut [u8]) -> Result<(), i32> {
    // SAFETY: driver installed in init_i2c(); buffers outlive the call;
    // main-loop only.
    let ret = unsafe {
        i2c_master_write_read_device(
            I2C_PORT,
            addr,
            wr.as_ptr(),
            wr.len(),
            rd.as_mut_ptr(),
            rd.len(),
            I2C_TIMEOUT_TICKS,
        )
    };
    if ret == ESP_OK {
        Ok(())
    } else {
        Err(ret)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write_read(_addr: u8, _wr: &[u8], rd: &mut [u8]) -> Result<(), i32> {
    // Expander idles high (keys released, active-low).
    rd.fill(0xFF);
    Ok(())
}

// ── Key GPIOs (12-key board: one input per key) ───────────────

#[cfg(target_os = "espidf")]
pub fn init_key_gpios(gpios: &[i32]) -> Result<(), HwInitError> {
    for &pin in gpios {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: single-threaded init path.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    info!("hw_init: {} key GPIOs configured (input, pull-up)", gpios.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_key_gpios(_gpios: &[i32]) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): key GPIO init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    // Pull-up idle level: key released.
    true
}

// ── SPI (LED strip) ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut LED_SPI_HANDLE: spi_device_handle_t = core::ptr::null_mut();

/// SAFETY: LED_SPI_HANDLE is written once in `init_spi()` before the
/// polling loop starts; read only from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn led_spi_handle() -> spi_device_handle_t {
    unsafe { LED_SPI_HANDLE }
}

#[cfg(target_os = "espidf")]
pub fn init_spi() -> Result<(), HwInitError> {
    let bus_cfg = spi_bus_config_t {
        __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 {
            mosi_io_num: pins::LED_SPI_MOSI_GPIO,
        },
        __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 { miso_io_num: -1 },
        sclk_io_num: pins::LED_SPI_SCLK_GPIO,
        __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
        __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
        max_transfer_sz: 0,
        ..Default::default()
    };
    let dev_cfg = spi_device_interface_config_t {
        clock_speed_hz: pins::LED_SPI_FREQ_HZ as i32,
        mode: 0,
        spics_io_num: -1,
        queue_size: 1,
        ..Default::default()
    };
    // SAFETY: single-threaded init path; LED_SPI_HANDLE written once.
    unsafe {
        let ret = spi_bus_initialize(spi_host_device_t_SPI2_HOST, &bus_cfg, spi_common_dma_t_SPI_DMA_CH_AUTO);
        if ret != ESP_OK {
            return Err(HwInitError::SpiInitFailed(ret));
        }
        let ret = spi_bus_add_device(spi_host_device_t_SPI2_HOST, &dev_cfg, &raw mut LED_SPI_HANDLE);
        if ret != ESP_OK {
            return Err(HwInitError::SpiInitFailed(ret));
        }
    }
    info!("hw_init: LED SPI configured (MOSI={}, SCLK={})", pins::LED_SPI_MOSI_GPIO, pins::LED_SPI_SCLK_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_spi() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): SPI init skipped");
    Ok(())
}

/// Blocking transmit of one LED frame.
#[cfg(target_os = "espidf")]
pub fn spi_write(frame: &[u8]) -> Result<(), i32> {
    let mut txn = spi_transaction_t {
        length: frame.len() * 8,
        __bindgen_anon_1: spi_transaction_t__bindgen_ty_1 {
            tx_buffer: frame.as_ptr().cast(),
        },
        ..Default::default()
    };
    // SAFETY: handle initialised in init_spi(); frame outlives the
    // blocking transmit; main-loop only.
    let ret = unsafe { spi_device_transmit(led_spi_handle(), &mut txn) };
    if ret == ESP_OK {
        Ok(())
    } else {
        Err(ret)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn spi_write(_frame: &[u8]) -> Result<(), i32> {
    Ok(())
}

// ── USB HID device ────────────────────────────────────────────
//
// The TinyUSB stack comes in via the espressif/esp_tinyusb managed
// component. Report IDs match the HID descriptor in the component
// config: 1 = boot keyboard, 2 = consumer control.

pub const HID_REPORT_ID_KEYBOARD: u8 = 1;
pub const HID_REPORT_ID_CONSUMER: u8 = 2;

#[cfg(target_os = "espidf")]
pub fn init_usb() -> Result<(), HwInitError> {
    let cfg = tinyusb_config_t::default();
    // SAFETY: single-threaded init path, driver installed once.
    let ret = unsafe { tinyusb_driver_install(&cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::UsbInitFailed(ret));
    }
    info!("hw_init: USB HID device installed");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_usb() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): USB init skipped");
    Ok(())
}

/// Whether the host has mounted the HID interface.
#[cfg(target_os = "espidf")]
pub fn hid_ready() -> bool {
    // SAFETY: tud_mounted reads TinyUSB device state; safe from the
    // main task once the driver is installed.
    unsafe { tud_mounted() && tud_hid_n_ready(0) }
}

#[cfg(not(target_os = "espidf"))]
pub fn hid_ready() -> bool {
    true
}

/// Send one HID input report.
#[cfg(target_os = "espidf")]
pub fn hid_report(report_id: u8, payload: &[u8]) -> Result<(), ()> {
    // SAFETY: TinyUSB copies the payload before returning; main-loop only.
    let ok = unsafe { tud_hid_n_report(0, report_id, payload.as_ptr().cast(), payload.len() as u16) };
    if ok {
        Ok(())
    } else {
        Err(())
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn hid_report(_report_id: u8, _payload: &[u8]) -> Result<(), ()> {
    Ok(())
}

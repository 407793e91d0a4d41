//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, GPIO directions, the I2C master bus, and the
//! buzzer LEDC timer using raw ESP-IDF sys calls. Called once from `main()`
//! before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::{error, info, warn};

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_i2c()?;
        init_ledc();
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// ADC1 channels for the moisture probes, indexed by plant slot.
/// GPIO5 → CH4, GPIO6 → CH5 on the ESP32-S3.
#[cfg(target_os = "espidf")]
const MOISTURE_ADC_CHANNELS: [u32; crate::config::MAX_PLANTS] =
    [adc_channel_t_ADC_CHANNEL_4, adc_channel_t_ADC_CHANNEL_5];

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<()> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        error!("hw_init: adc_oneshot_new_unit failed (rc={})", ret);
        return Err(Error::Init("ADC1 oneshot unit"));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: pins::MOISTURE_ADC_ATTEN,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_10,
    };

    for &channel in &MOISTURE_ADC_CHANNELS {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            error!("hw_init: adc_oneshot_config_channel({}) failed (rc={})", channel, ret);
            return Err(Error::Init("ADC1 channel config"));
        }
    }

    info!("hw_init: ADC1 configured (CH4=moisture1, CH5=moisture2)");
    Ok(())
}

/// Read the raw moisture ADC value for a plant slot (10-bit, 0..=1023).
///
/// The capacitive probe output needs roughly 10 ms to settle after a
/// sample before the next read is trustworthy. Callers run from the
/// control loop, whose `control_loop_interval_ms` tick spacing (10 ms
/// minimum, see `SystemConfig::validate`) provides that gap; do not call
/// this back-to-back for the same channel.
#[cfg(target_os = "espidf")]
pub fn adc1_read_moisture(plant: usize) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: ADC1_HANDLE is written once during init_adc() before this
    // function is called; single-threaded main-loop access guaranteed.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), MOISTURE_ADC_CHANNELS[plant], &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    // TTP223 touch pads drive their output HIGH while touched.
    let input_pins = [
        pins::TOUCH_PREV_GPIO,
        pins::TOUCH_NEXT_GPIO,
        pins::TOUCH_ACTION_GPIO,
    ];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            error!("hw_init: gpio_config(input {}) failed (rc={})", pin, ret);
            return Err(Error::Init("touch pad GPIO config"));
        }
    }

    info!("hw_init: GPIO inputs configured (touch pads)");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [pins::RELAY_1_GPIO, pins::RELAY_2_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            error!("hw_init: gpio_config(output {}) failed (rc={})", pin, ret);
            return Err(Error::Init("relay GPIO config"));
        }
        // Relays start closed (pumps off).
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (relays off)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── I2C master (water level ATtinys) ──────────────────────────

#[cfg(target_os = "espidf")]
const I2C_PORT: i32 = 0;
#[cfg(target_os = "espidf")]
const I2C_FREQ_HZ: u32 = 100_000;
#[cfg(target_os = "espidf")]
const I2C_TIMEOUT_TICKS: u32 = 20;

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<()> {
    let mut cfg = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: true,
        scl_pullup_en: true,
        ..Default::default()
    };
    cfg.__bindgen_anon_1.master.clk_speed = I2C_FREQ_HZ;

    // SAFETY: I2C port 0 is configured once at boot and used only from the
    // single-threaded sensor read path afterwards.
    let ret = unsafe { i2c_param_config(I2C_PORT, &cfg) };
    if ret != ESP_OK as i32 {
        error!("hw_init: i2c_param_config failed (rc={})", ret);
        return Err(Error::Init("I2C master config"));
    }
    let ret = unsafe { i2c_driver_install(I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        error!("hw_init: i2c_driver_install failed (rc={})", ret);
        return Err(Error::Init("I2C driver install"));
    }

    info!("hw_init: I2C master configured (SDA={}, SCL={})", pins::I2C_SDA_GPIO, pins::I2C_SCL_GPIO);
    Ok(())
}

/// Blocking read of exactly `buf.len()` bytes from an I2C device.
/// On a bus error the buffer is zeroed so downstream decoding sees an
/// empty (all segments dry) frame rather than stale data.
#[cfg(target_os = "espidf")]
pub fn i2c_read_exact(addr: u8, buf: &mut [u8]) {
    // SAFETY: driver installed in init_i2c(); buf pointer is valid for
    // buf.len() bytes for the duration of the call.
    let ret = unsafe {
        i2c_master_read_from_device(
            I2C_PORT,
            addr,
            buf.as_mut_ptr(),
            buf.len(),
            I2C_TIMEOUT_TICKS,
        )
    };
    if ret != ESP_OK as i32 {
        warn!("i2c: read from 0x{:02x} failed (rc={}), zeroing frame", addr, ret);
        buf.fill(0);
    }
}

// ── LEDC PWM (buzzer tone) ───────────────────────────────────

pub const LEDC_CH_BUZZER: u32 = 0;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() {
    // Timer 0: buzzer tone (frequency set per-beep, 8-bit duty).
    // SAFETY: Called from single main-task context via init_peripherals().
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: crate::drivers::buzzer::BEEP_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    unsafe {
        ledc_timer_config(&timer0);
    }

    unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::BUZZER_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        });
    }

    info!("hw_init: LEDC configured (buzzer=CH0)");
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channel was configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::drivers::touch::{touch_isr_handler, TouchPad};

#[cfg(target_os = "espidf")]
unsafe extern "C" fn touch_prev_isr(_arg: *mut core::ffi::c_void) {
    touch_isr_handler(TouchPad::Prev, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn touch_next_isr(_arg: *mut core::ffi::c_void) {
    touch_isr_handler(TouchPad::Next, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn touch_action_isr(_arg: *mut core::ffi::c_void) {
    touch_isr_handler(TouchPad::Action, isr_now_ms());
}

#[cfg(target_os = "espidf")]
fn isr_now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is an RTC counter read; safe in ISR context.
    (unsafe { esp_timer_get_time() } / 1_000) as u32
}

/// Install the per-pin GPIO ISR service and register the touch handlers.
/// Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<()> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). ISR handlers registered
    // below are static functions that only push to the lock-free event queue.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            error!("hw_init: gpio_install_isr_service failed (rc={})", ret);
            return Err(Error::Init("GPIO ISR service install"));
        }

        // Touch pads: rising edge = touch-down (TTP223 active-high).
        let pads: [(i32, unsafe extern "C" fn(*mut core::ffi::c_void)); 3] = [
            (pins::TOUCH_PREV_GPIO, touch_prev_isr),
            (pins::TOUCH_NEXT_GPIO, touch_next_isr),
            (pins::TOUCH_ACTION_GPIO, touch_action_isr),
        ];
        for (pin, handler) in pads {
            gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_POSEDGE);
            gpio_isr_handler_add(pin, Some(handler), core::ptr::null_mut());
            gpio_intr_enable(pin);
        }

        info!("hw_init: ISR service installed (touch×3)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<()> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_init_paths_report_ready() {
        assert_eq!(init_peripherals(), Ok(()));
        assert_eq!(init_isr_service(), Ok(()));
    }
}

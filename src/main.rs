#![no_std]
#![no_main]

use atmega_hal as hal;
use embedded_hal::delay::DelayNs;
use nano_fmt::NanoDisplay;
use panic_halt as _;

use quadtimer::{
    board::Timers,
    config, critical,
    delay::MsDelay,
    report::Snapshot,
    stopwatch::{self, Stopwatch},
    usart::Usart0,
};

/// UART baud rate.
const BAUDRATE: u32 = 57600;

/// Length of the delay measured by the stopwatch, in milliseconds. Timer1
/// overflows after 262 ms.
const PROBE_MS: u32 = 100;

#[hal::entry]
fn main() -> ! {
    let dp = hal::Peripherals::take().unwrap();
    let pins = hal::pins!(dp);

    let mut serial = Usart0::new(dp.USART0, pins.pe0, pins.pe1.into_output(), BAUDRATE);

    "quadtimer\r\n".fmt(&mut serial);

    let Timers {
        mut timer0,
        timer1,
        mut timer2,
        timer3,
    } = Timers::new(dp.TC1, dp.TC2, dp.TC3, dp.TC5);

    // The bit-bang clock is started here and never stopped.
    timer2.set_period(config::BITBANG_PERIOD);
    let mut bitbang_clock = timer2.into_free_running();

    let mut delay = MsDelay::new(timer3);
    let mut probe = Stopwatch::new(timer1);

    // Enable interrupts. Nothing is bracketed at this point.
    critical::exit();

    loop {
        probe.begin();
        delay.delay_ms(PROBE_MS);
        let ticks = probe.end();

        "delay ".fmt(&mut serial);
        PROBE_MS.fmt(&mut serial);
        " ms = ".fmt(&mut serial);
        stopwatch::micros(ticks).fmt(&mut serial);
        " us\r\n".fmt(&mut serial);

        Snapshot::of16(0, &mut timer0).fmt(&mut serial);
        Snapshot::of_free_running(2, &mut bitbang_clock).fmt(&mut serial);

        delay.delay_ms(1000 - PROBE_MS);
    }
}

use core::cell::Cell;

use embedded_hal_async::delay::DelayNs;
use heapless::{LinearMap, Vec};

use crate::bus::{Bus, MAX_REG_BYTES};
use crate::clock::{Clock, Instant};
use crate::error::Veml6075Error;
use crate::register::{decode_u16, Readable, Writable};
use crate::sink::ValueSink;

/// Register file backed fake. Writes are logged and stored, so they can be read back.
pub struct FakeBus<const N: usize> {
    regs: LinearMap<u8, [u8; MAX_REG_BYTES], N>,
    failing_reads: Vec<u8, N>,
    fail_writes: bool,
    writes: Vec<(u8, u16), 32>,
    reads: usize,
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            failing_reads: Vec::new(),
            fail_writes: false,
            writes: Vec::new(),
            reads: 0,
        }
    }

    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs.insert(R::ADDR, register_value).unwrap();
    }

    pub fn fail_reads_of<R: Readable>(&mut self) {
        self.failing_reads.push(R::ADDR).unwrap();
    }

    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    /// Every attempted write as `(address, value)`, in order.
    pub fn writes(&self) -> &[(u8, u16)] {
        &self.writes
    }

    /// Number of attempted reads, failed ones included.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Veml6075Error<Self::Error>> {
        self.reads += 1;

        if self.failing_reads.contains(&R::ADDR) {
            return Err(Veml6075Error::Bus(()));
        }

        if let Some(bytes) = self.regs.get(&R::ADDR) {
            return Ok(R::decode(&bytes[..R::N])?);
        }

        panic!("No mocked value for register 0x{:x}", R::ADDR)
    }

    async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Veml6075Error<Self::Error>> {
        let mut bytes = [0u8; MAX_REG_BYTES];
        W::encode(v, &mut bytes[..W::N]);
        self.writes.push((W::ADDR, decode_u16(bytes[0], bytes[1]))).unwrap();

        if self.fail_writes {
            return Err(Veml6075Error::Bus(()));
        }

        self.regs.insert(W::ADDR, bytes).unwrap();
        Ok(())
    }
}

/// Shared fake time. Delays advance it, the clock reads it.
pub struct FakeTime {
    now_ms: Cell<u64>,
}

impl FakeTime {
    pub fn new() -> Self {
        Self { now_ms: Cell::new(0) }
    }

    pub fn delay(&self) -> FakeDelay<'_> {
        FakeDelay { now_ms: &self.now_ms }
    }

    pub fn clock(&self) -> FakeClock<'_> {
        FakeClock { now_ms: &self.now_ms }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

pub struct FakeDelay<'a> {
    now_ms: &'a Cell<u64>,
}

impl DelayNs for FakeDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.now_ms.set(self.now_ms.get() + (ns / 1_000_000) as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.now_ms.set(self.now_ms.get() + ms as u64);
    }
}

pub struct FakeClock<'a> {
    now_ms: &'a Cell<u64>,
}

impl Clock for FakeClock<'_> {
    fn now(&mut self) -> Instant {
        Instant::from_ticks(self.now_ms.get())
    }
}

/// Records what a sink received.
pub struct Published {
    count: Cell<usize>,
    last: Cell<Option<f32>>,
}

impl Published {
    pub fn new() -> Self {
        Self { count: Cell::new(0), last: Cell::new(None) }
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn last(&self) -> Option<f32> {
        self.last.get()
    }
}

impl ValueSink for &Published {
    fn publish(&mut self, value: f32) {
        self.count.set(self.count.get() + 1);
        self.last.set(Some(value));
    }
}

//! The block-copy protocol BOOT uses to stream a kernel image off the RAM
//! disk that backs it into the kernel's load region.
//!
//! Skip the first four blocks (the ELF header and program headers), copy
//! whole blocks, then copy one trailing partial block if the image size
//! isn't a multiple of [`BSIZE`]. [`BlockDevice`] turns the block-read side
//! of the copy into a trait so this loop is unit-testable against an
//! in-memory fake.

/// Which of the two kernel image slots a request names.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KernelKind {
    Normal,
    Recovery,
}

/// The fixed unit of transfer between the boot device and memory.
pub const BSIZE: usize = 1024;

/// The buffer descriptor `kernel_copy` fills: the caller sets `blockno` and
/// clears `valid` to force a read; the driver populates `data`.
pub struct BlockBuf {
    pub blockno: u64,
    pub valid: bool,
    pub data: [u8; BSIZE],
}

impl BlockBuf {
    pub const fn empty() -> Self {
        Self { blockno: 0, valid: false, data: [0; BSIZE] }
    }
}

/// The block source abstraction: block 0 holds the ELF header, blocks 1-3
/// the program headers, blocks `>= 4` the loadable sections.
pub trait BlockDevice {
    fn kernel_copy(&mut self, kind: KernelKind, buf: &mut BlockBuf);
}

/// Copy `size` bytes of `kind`'s image into `dest`, skipping the first four
/// header blocks.
///
/// `dest` must be at least `size - 4 * BSIZE` bytes long — the header
/// blocks are never copied in, matching `start.c`'s
/// `no_of_blocks_to_copy = kernel_binary_size / BSIZE - 4`.
pub fn copy_kernel_image<D: BlockDevice>(dev: &mut D, kind: KernelKind, size: u64, dest: &mut [u8]) {
    let whole_blocks = (size / BSIZE as u64).saturating_sub(4);
    let mut buf = BlockBuf::empty();

    for i in 0..whole_blocks {
        buf.blockno = i + 4;
        buf.valid = false;
        dev.kernel_copy(kind, &mut buf);
        let offset = (i * BSIZE as u64) as usize;
        dest[offset..offset + BSIZE].copy_from_slice(&buf.data);
    }

    let remaining = (size % BSIZE as u64) as usize;
    if remaining > 0 {
        buf.blockno = whole_blocks + 4;
        buf.valid = false;
        dev.kernel_copy(kind, &mut buf);
        let offset = (whole_blocks * BSIZE as u64) as usize;
        dest[offset..offset + remaining].copy_from_slice(&buf.data[..remaining]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An in-memory block device backed by a fixed-size image buffer, so
    /// the copy loop can be exercised without a real RAM disk.
    struct FakeDevice {
        image: [u8; 4 * BSIZE + 37],
        reads: usize,
    }

    impl FakeDevice {
        fn new() -> Self {
            let mut image = [0u8; 4 * BSIZE + 37];
            for (i, byte) in image.iter_mut().enumerate() {
                *byte = (i % 256) as u8;
            }
            Self { image, reads: 0 }
        }
    }

    impl BlockDevice for FakeDevice {
        fn kernel_copy(&mut self, _kind: KernelKind, buf: &mut BlockBuf) {
            assert!(!buf.valid, "caller must clear valid to force a read");
            let offset = buf.blockno as usize * BSIZE;
            buf.data.copy_from_slice(&self.image[offset..offset + BSIZE]);
            self.reads += 1;
        }
    }

    #[test]
    fn skips_the_first_four_header_blocks() {
        let mut dev = FakeDevice::new();
        // Header blocks (0..4) plus exactly one whole data block (4).
        let size = 5 * BSIZE as u64;
        let mut dest = [0u8; BSIZE];

        copy_kernel_image(&mut dev, KernelKind::Normal, size, &mut dest);

        assert_eq!(dev.reads, 1, "only the one data block should be read");
        assert_eq!(dest, dev.image[4 * BSIZE..5 * BSIZE]);
    }

    #[test]
    fn copies_a_trailing_partial_block() {
        let mut dev = FakeDevice::new();
        let size = 4 * BSIZE as u64 + 37;
        let mut dest = [0u8; 37];

        copy_kernel_image(&mut dev, KernelKind::Normal, size, &mut dest);

        assert_eq!(dev.reads, 1);
        assert_eq!(dest, dev.image[4 * BSIZE..4 * BSIZE + 37]);
    }

    #[test]
    fn whole_blocks_and_partial_block_together() {
        let mut dev = FakeDevice::new();
        let size = 4 * BSIZE as u64 + BSIZE as u64 + 10;
        let mut dest = [0u8; BSIZE + 10];

        copy_kernel_image(&mut dev, KernelKind::Normal, size, &mut dest);

        assert_eq!(dev.reads, 2, "one whole block plus one trailing partial block");
        assert_eq!(dest[..BSIZE], dev.image[4 * BSIZE..5 * BSIZE]);
        assert_eq!(dest[BSIZE..], dev.image[5 * BSIZE..5 * BSIZE + 10]);
    }

    #[test]
    fn exact_multiple_of_bsize_reads_no_partial_block() {
        let mut dev = FakeDevice::new();
        let size = 6 * BSIZE as u64;
        let mut dest = [0u8; 2 * BSIZE];

        copy_kernel_image(&mut dev, KernelKind::Normal, size, &mut dest);

        assert_eq!(dev.reads, 2);
    }
}

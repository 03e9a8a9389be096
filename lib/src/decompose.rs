use crate::afi::{Afi, Bits};
use crate::cidr::{Cidr, Range};

/// Tile a merged range with the minimal ordered list of CIDR blocks.
///
/// Standard greedy supernetting: at each position take the largest block
/// that is both aligned there and fits the remaining span. Alignment is the
/// number of trailing zero bits of the current position (position zero
/// allows the full address space), so the result is provably minimal.
///
/// Block sizes are computed purely from bit positions; sizes up to `2^128`
/// are exact, and advancing past the top of the address space cannot
/// overflow because the final block is detected before the step.
pub fn decompose<A: Afi>(range: Range<A>) -> Vec<Cidr<A>> {
    let width = u32::from(A::MAX_LENGTH);
    let mut blocks = Vec::new();
    let mut cur = range.start();
    loop {
        // Largest aligned block that may start at `cur`, in bits.
        let align_bits = if cur == A::Bits::ZERO {
            width
        } else {
            cur.trailing_zeros().min(width)
        };
        // Largest block not exceeding the remaining span, in bits:
        // floor(log2(end - cur + 1)), without materializing the size.
        let span_minus_one = range.end() - cur;
        let fit_bits = match span_minus_one.checked_add(A::Bits::ONE) {
            Some(span) => A::Bits::REPR_WIDTH - 1 - span.leading_zeros(),
            // The span is the entire representation; only reachable when
            // the range covers the full 128-bit space.
            None => width,
        };
        let length = (width - align_bits.min(fit_bits)) as u8;
        let block = Cidr::new(cur, length);
        let block_end = block.range().end();
        blocks.push(block);
        if block_end == range.end() {
            return blocks;
        }
        cur = block_end + A::Bits::ONE;
    }
}

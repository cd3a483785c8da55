use std::ops::Deref;

use super::metadata::{ECLevel, Version};

// ECC: Error Correction Codeword generator
//------------------------------------------------------------------------------

// Splits data codewords into blocks and computes the Reed-Solomon codewords of each
pub fn ecc(data: &[u8], ver: Version, ecl: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, ver, ecl);

    let gen_poly = generator_polynomial(ver.ecc_per_block(ecl));
    let ecc_blocks = data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

pub fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) = ver.data_codewords_per_block(ecl);

    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(block1_count + block2_count);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

// Generator polynomial of the given degree, leading coefficient dropped.
// Product of (x - a^i) for i in 0..degree, a = 0x02.
fn generator_polynomial(degree: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&degree), "Degree out of range: {degree}");

    let mut res = vec![0u8; degree - 1];
    res.push(1);
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            res[j] = gf_mul(res[j], root);
            if j + 1 < degree {
                res[j] ^= res[j + 1];
            }
        }
        root = gf_mul(root, 0x02);
    }
    res
}

// Remainder of the data polynomial divided by the generator polynomial. Its
// coefficients are the error correction codewords.
fn ecc_per_block(block: &[u8], gen_poly: &[u8]) -> Vec<u8> {
    let mut res = vec![0u8; gen_poly.len()];
    for b in block {
        let factor = b ^ res[0];
        res.rotate_left(1);
        if let Some(last) = res.last_mut() {
            *last = 0;
        }
        for (r, g) in res.iter_mut().zip(gen_poly.iter()) {
            *r ^= gf_mul(*g, factor);
        }
    }
    res
}

// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1
fn gf_mul(x: u8, y: u8) -> u8 {
    let mut z = 0u8;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1D);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

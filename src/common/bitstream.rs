// Bit buffer with a fixed bit capacity
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Bytes touched so far, last one zero padded
    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            self.data[self.len >> 3] |= 0b1000_0000 >> (self.len & 7);
        }
        self.len += 1;
    }

    // Appends the lowest `size` bits of `bits`, most significant first
    pub fn push_bits(&mut self, bits: u16, size: usize) {
        debug_assert!(size <= 16, "Cannot push more than 16 bits at once: {size}");
        debug_assert!(
            size >= (16 - bits.leading_zeros()) as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & 1 == 1);
        }
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "Index out of bounds: Index {i}, Length {}", self.len);
        (self.data[i >> 3] >> (7 - (i & 7))) & 1 == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }
}

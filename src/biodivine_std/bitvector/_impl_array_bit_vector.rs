use crate::biodivine_std::bitvector::{ArrayBitVector, BitVector};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/* `bitvector::BitVector` implements neither `Eq` nor `Hash`, but states are used as map keys. */
impl Eq for ArrayBitVector {}

impl Hash for ArrayBitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for index in self.values.iter() {
            index.hash(state);
        }
    }
}

impl ArrayBitVector {
    /// **(internal)** Check if the given index is valid in this `BitVector` - panic otherwise.
    fn check_access(&self, index: usize) {
        if index >= self.len {
            panic!(
                "Accessing element {} in a BitVector of length {}.",
                index, self.len
            );
        }
    }
}

impl BitVector for ArrayBitVector {
    fn empty(len: usize) -> Self {
        ArrayBitVector {
            len,
            values: bitvector::BitVector::new(len),
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> bool {
        self.check_access(index);
        self.values.contains(index)
    }

    fn set(&mut self, index: usize, value: bool) {
        self.check_access(index);
        if value {
            self.values.insert(index);
        } else {
            self.values.remove(index);
        }
    }

    fn flip(&mut self, index: usize) {
        self.check_access(index);
        if self.values.contains(index) {
            self.values.remove(index);
        } else {
            self.values.insert(index);
        }
    }

    fn ones(&self) -> Vec<usize> {
        self.values.iter().collect()
    }

    fn count_ones(&self) -> usize {
        self.values.iter().count()
    }
}

impl Display for ArrayBitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.display(f)
    }
}

impl From<Vec<bool>> for ArrayBitVector {
    fn from(data: Vec<bool>) -> Self {
        Self::from_bool_vector(data)
    }
}

impl Debug for ArrayBitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "ArrayBitVector({})[", self.len)?;
        for i in 0..self.len {
            write!(f, "{}", i32::from(self.get(i)))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::bitvector::{ArrayBitVector, BitVector};
    use std::collections::HashSet;

    #[test]
    fn test_array_bit_vector() {
        let mut bv = ArrayBitVector::empty(10);
        assert_eq!(vec![false; 10], bv.values());
        bv.set(2, true);
        bv.flip(6);
        assert!(bv.get(2));
        assert!(bv.get(6));
        assert_eq!(vec![2, 6], bv.ones());
        assert_eq!(2, bv.count_ones());
        let mut expected = vec![false; 10];
        expected[2] = true;
        expected[6] = true;
        assert_eq!(bv, ArrayBitVector::from(expected));
        assert_eq!("ArrayBitVector(10)[0010001000]", format!("{:?}", bv));
        assert_eq!("BV(10)[2 6]", bv.to_string());
        bv.set(6, false);
        assert!(!bv.get(6));
        bv.flip(2);
        assert!(!bv.get(2));
    }

    #[test]
    fn test_hamming_and_hash() {
        let a = ArrayBitVector::from(vec![true, false, true, true]);
        let b = ArrayBitVector::from(vec![false, false, true, false]);
        assert_eq!(2, a.hamming_distance(&b));
        let mut set = HashSet::new();
        set.insert(a.clone());
        set.insert(ArrayBitVector::from(vec![true, false, true, true]));
        set.insert(b);
        assert_eq!(2, set.len());
    }

    #[test]
    #[should_panic]
    fn test_array_bit_vector_invalid_access() {
        let mut b = ArrayBitVector::empty(80);
        b.flip(100);
    }
}

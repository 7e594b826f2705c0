//! Feature-hashing provider.
//!
//! Generates fixed-dimension vectors from term frequencies hashed into
//! buckets. No model files, fully deterministic.

use kbase_core::errors::KbaseResult;
use kbase_core::traits::IEmbeddingProvider;

/// Hashing embedding provider.
///
/// Terms are lowercased alphanumeric runs of two or more characters, hashed
/// with FNV-1a into `dimensions` buckets and weighted by frequency. Output is
/// L2-normalized.
pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec;
        }

        // Summed in token order so colliding buckets add up identically on
        // every call.
        let total = tokens.len() as f32;
        for term in &tokens {
            // Longer terms carry more signal than short stopword-like ones.
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += weight / total;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> KbaseResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}

//! Tests for in-memory index search ordering, clamping, and validation.

use std::collections::HashMap;

use charter_rag::document::Chunk;
use charter_rag::inmemory::InMemoryVectorIndex;
use charter_rag::vectorstore::VectorIndex;
use charter_rag::RagError;
use proptest::prelude::*;

fn chunk(i: usize, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: format!("doc_{i}"),
        text: format!("segment {i}"),
        embedding,
        metadata: HashMap::new(),
        document_id: "doc".to_string(),
    }
}

fn ids(results: &[charter_rag::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.chunk.id.as_str()).collect()
}

#[tokio::test]
async fn returns_nearest_first() {
    let index = InMemoryVectorIndex::build(vec![
        chunk(0, vec![1.0, 0.0]),
        chunk(1, vec![0.0, 1.0]),
        chunk(2, vec![0.7, 0.7]),
    ])
    .unwrap();

    let results = index.search(&[0.0, 1.0], 2).await.unwrap();
    assert_eq!(ids(&results), vec!["doc_1", "doc_2"]);
    assert!(results[0].score > results[1].score);
}

#[tokio::test]
async fn clamps_top_k_to_index_size() {
    let index = InMemoryVectorIndex::build(vec![
        chunk(0, vec![1.0, 0.0]),
        chunk(1, vec![0.0, 1.0]),
    ])
    .unwrap();

    let results = index.search(&[1.0, 0.0], 10).await.unwrap();
    assert_eq!(ids(&results), vec!["doc_0", "doc_1"]);
}

#[tokio::test]
async fn equal_scores_keep_document_order() {
    let index = InMemoryVectorIndex::build(
        (0..5).map(|i| chunk(i, vec![1.0, 1.0])).collect(),
    )
    .unwrap();

    let results = index.search(&[1.0, 1.0], 5).await.unwrap();
    assert_eq!(ids(&results), vec!["doc_0", "doc_1", "doc_2", "doc_3", "doc_4"]);
}

#[tokio::test]
async fn empty_index_returns_no_results() {
    let index = InMemoryVectorIndex::default();
    assert!(index.is_empty());
    let results = index.search(&[1.0, 0.0, 0.0], 3).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn rejects_query_with_wrong_dimensionality() {
    let index = InMemoryVectorIndex::build(vec![chunk(0, vec![1.0, 0.0])]).unwrap();
    let err = index.search(&[1.0, 0.0, 0.0], 1).await.unwrap_err();
    assert!(matches!(err, RagError::VectorStoreError { .. }));
}

#[test]
fn build_rejects_inconsistent_embeddings() {
    let err = InMemoryVectorIndex::build(vec![chunk(0, vec![1.0, 0.0]), chunk(1, vec![1.0])])
        .unwrap_err();
    assert!(matches!(err, RagError::VectorStoreError { .. }));

    let err = InMemoryVectorIndex::build(vec![chunk(0, Vec::new())]).unwrap_err();
    assert!(matches!(err, RagError::VectorStoreError { .. }));
}

#[test]
fn build_keeps_chunks_in_order() {
    let index = InMemoryVectorIndex::build(vec![chunk(0, vec![1.0]), chunk(1, vec![2.0])]).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.dimensions(), 1);
    assert_eq!(index.chunks()[1].id, "doc_1");
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// *For any* set of embedded chunks, searching returns results ordered by
/// descending cosine similarity, exactly `min(top_k, len)` of them.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_clamped(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 0usize..25,
        ) {
            let count = embeddings.len();
            let chunks = embeddings.into_iter().enumerate().map(|(i, e)| chunk(i, e)).collect();
            let index = InMemoryVectorIndex::build(chunks).unwrap();

            let rt = tokio::runtime::Runtime::new().unwrap();
            let results = rt.block_on(index.search(&query, top_k)).unwrap();

            prop_assert_eq!(results.len(), top_k.min(count));
            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}

use tokenizers::Tokenizer;

use super::error::ClassifierError;

/// Token id used to fill sequences shorter than the model input length.
pub(crate) const PAD_ID: i64 = 0;

/// Converts text into the tokenizer's raw id sequence.
///
/// # Errors
/// - `TokenizerError` if the text cannot be encoded
pub(crate) fn encode(tokenizer: &Tokenizer, text: &str) -> Result<Vec<u32>, ClassifierError> {
    let encoding = tokenizer
        .encode(text, false)
        .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;
    Ok(encoding.get_ids().to_vec())
}

/// Normalizes a raw id sequence to exactly `length` ids: longer sequences are
/// truncated at the end, shorter ones padded at the end with [`PAD_ID`].
pub(crate) fn pad_to_length(ids: &[u32], length: usize) -> Vec<i64> {
    let mut padded: Vec<i64> = ids.iter().take(length).map(|&id| i64::from(id)).collect();
    padded.resize(length, PAD_ID);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_sequences_are_padded_at_the_end() {
        assert_eq!(pad_to_length(&[7, 3, 9], 5), vec![7, 3, 9, 0, 0]);
    }

    #[test]
    fn longer_sequences_are_truncated_at_the_end() {
        assert_eq!(pad_to_length(&[1, 2, 3, 4, 5, 6], 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn exact_length_sequences_pass_through() {
        assert_eq!(pad_to_length(&[1, 2, 3, 4, 5], 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn one_below_the_limit_gets_a_single_pad() {
        assert_eq!(pad_to_length(&[1, 2, 3, 4], 5), vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn empty_input_becomes_all_padding() {
        assert_eq!(pad_to_length(&[], 4), vec![0, 0, 0, 0]);
    }
}

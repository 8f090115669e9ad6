pub fn is_cjk(c: char) -> bool {
	let code = c as u32;

	matches!(
		code,
		0x3000..=0x303F
			| 0x3040..=0x309F
			| 0x30A0..=0x30FF
			| 0x4E00..=0x9FFF
			| 0xAC00..=0xD7AF
	)
}

pub fn contains_cjk(input: &str) -> bool {
	input.chars().any(is_cjk)
}

/// Extracts contiguous CJK character runs. Runs are kept whole so multi-character
/// words are never split into single characters during keyword extraction.
pub fn cjk_runs(input: &str) -> Vec<String> {
	let mut runs = Vec::new();
	let mut current = String::new();

	for ch in input.chars() {
		if is_cjk(ch) && !ch.is_whitespace() {
			current.push(ch);
		} else if !current.is_empty() {
			runs.push(std::mem::take(&mut current));
		}
	}

	if !current.is_empty() {
		runs.push(current);
	}

	runs
}

/// Replaces every CJK character with a space so the remainder can be
/// word-segmented without re-counting characters already captured as runs.
pub fn mask_cjk(input: &str) -> String {
	input.chars().map(|ch| if is_cjk(ch) { ' ' } else { ch }).collect()
}

// File: src/tokenizer/stopwords.rs

// Kept sorted; looked up with binary search.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
    "her", "his", "i", "in", "is", "it", "its", "of", "on", "or", "she", "that", "the", "their",
    "they", "this", "to", "was", "we", "were", "will", "with", "you",
    "а", "без", "бы", "в", "во", "вот", "все", "вы", "да", "для", "до", "его", "ее", "если",
    "же", "за", "и", "из", "или", "им", "их", "к", "как", "ко", "ли", "мы", "на", "над", "не",
    "нет", "ни", "но", "о", "об", "он", "она", "они", "оно", "от", "по", "под", "при", "с",
    "со", "так", "то", "у", "уж", "уже", "что", "это", "я",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

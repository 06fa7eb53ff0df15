/// Symptom phrases recognised in free text. Order here is the order
/// symptoms are reported in.
pub const VOCABULARY: [&str; 20] = [
    "barky cough",
    "hoarse voice",
    "stridor",
    "fever",
    "recession",
    "work of breathing",
    "wheeze",
    "cough",
    "sore throat",
    "runny nose",
    "congestion",
    "difficulty breathing",
    "shortness of breath",
    "chest pain",
    "fatigue",
    "headache",
    "nausea",
    "vomiting",
    "diarrhea",
    "abdominal pain",
];

/// Every vocabulary phrase occurring anywhere in `text`, compared
/// case-insensitively. Each phrase is reported at most once.
pub fn find(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    VOCABULARY
        .iter()
        .filter(|phrase| haystack.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

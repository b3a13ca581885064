use std::{fs, io::Write};
use wordpiecer::{
    LoadError, LookupError, Mode, Tokenizer, TokenizerConfig, Vocab, VocabSource, WordPiece,
};

const VOCAB: &str = "\
[PAD]
[UNK]
[CLS]
[SEP]
为
什
么
制
冷
时
室
内
机
显
示
度
4
##4
##0
40
44
un
##aff
##able
";

#[test]
fn tokenize_vocab_file() {
    tempdir::TempDir::new("wordpiecer")
        .and_then(|dir| {
            let path = dir.path().join("vocab.txt");
            fs::File::create(&path)?.write_all(VOCAB.as_bytes())?;

            let tokenizer = Tokenizer::from_source(path.as_path(), &TokenizerConfig::default())
                .expect("Failed to load vocab");
            assert_eq!(tokenizer.vocab().len(), 24);

            let text = "为什么制冷时室内机四十显示四十四度";
            assert_eq!(tokenizer.normalize(text), "为什么制冷时室内机40显示44度");

            let tokens = tokenizer.tokenize(text, Mode::WordPiece);
            assert_eq!(
                tokens,
                ["为", "什", "么", "制", "冷", "时", "室", "内", "机", "40", "显", "示", "44", "度"]
            );
            let ids = tokenizer.tokens_to_ids(&tokens).unwrap();
            assert_eq!(ids[9], 19);
            assert_eq!(tokenizer.ids_to_tokens(&ids).unwrap(), tokens);

            let chars = tokenizer.tokenize(text, Mode::Char);
            assert_eq!(chars.len(), 16);
            assert_eq!(&chars[9..11], ["4", "0"]);

            Ok(())
        })
        .unwrap();
}

#[test]
fn missing_vocab_file() {
    let result = Tokenizer::from_source(
        VocabSource::Path("/does/not/exist/vocab.txt".into()),
        &TokenizerConfig::default(),
    );
    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[test]
fn inline_and_bytes_agree() {
    let lines = VOCAB.lines().map(str::to_string).collect::<Vec<_>>();
    let inline = Vocab::load(VocabSource::Inline(lines)).unwrap();
    let bytes = Vocab::load(VocabSource::Bytes(VOCAB.as_bytes().to_vec())).unwrap();
    assert_eq!(
        inline.iter().collect::<Vec<_>>(),
        bytes.iter().collect::<Vec<_>>()
    );
}

#[test]
fn segmentation_example() {
    let wp = WordPiece::new(Vocab::new(["un", "##aff", "##able"]).unwrap());
    assert_eq!(wp.segment("unaffable"), ["un", "##aff", "##able"]);
    assert_eq!(wp.segment("unknownword"), ["[UNK]"]);
    assert_eq!(wp.segment(&"x".repeat(201)), ["[UNK]"]);
}

#[test]
fn round_trip_ids() {
    let tokenizer = Tokenizer::new(Vocab::from_txt(VOCAB.as_bytes()).unwrap(), &Default::default());
    let tokens = tokenizer.tokenize("UNaffable 室内机 显示 zzz", Mode::WordPiece);
    assert_eq!(
        tokens,
        ["un", "##aff", "##able", "室", "内", "机", "显", "示", "[UNK]"]
    );
    let ids = tokenizer.encode("UNaffable 室内机 显示 zzz", Mode::WordPiece).unwrap();
    assert_eq!(tokenizer.ids_to_tokens(&ids).unwrap(), tokens);
    assert_eq!(tokenizer.ids_to_tokens(&[1000]), Err(LookupError::Id(1000)));
}

#[test]
fn retokenizing_is_stable() {
    let tokenizer = Tokenizer::new(Vocab::from_txt(VOCAB.as_bytes()).unwrap(), &Default::default());
    let once = tokenizer.basic().clean_and_split("室内机四十四度, Un-Aff!");
    let twice = tokenizer.basic().clean_and_split(&once.join(" "));
    assert_eq!(once, twice);
}

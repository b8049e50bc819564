use crate::anki::types::CardTemplate;

pub const ENG_TO_KOR: CardTemplate = CardTemplate {
    name: "English -> Korean",
    qfmt: r#"<div class="english">{{English}}</div>"#,
    afmt: r#"{{FrontSide}}<hr id="answer"><div class="korean">{{Korean}}<br>{{Audio}}<br>{{Image}}</div>"#,
};

pub const LISTENING: CardTemplate = CardTemplate {
    name: "Listening (Audio -> English + Audio)",
    qfmt: "{{Audio}}",
    afmt: r#"{{FrontSide}}<hr id="answer"><div class="english">{{English}}</div><div class="korean">{{Korean}}</div>"#,
};

pub const IMAGE_TO_KOR: CardTemplate = CardTemplate {
    name: "Image -> Korean + Audio + English",
    qfmt: "{{Image}}",
    afmt: r#"{{FrontSide}}<hr id="answer"><div class="korean">{{Korean}} ({{English}})</div><br>{{Audio}}"#,
};

pub const DEFAULT_CSS: &str = r#".card {
    font-family: "Noto Sans KR", "Malgun Gothic", arial, sans-serif;
    font-size: 24px;
    text-align: center;
    color: #1a1a1a;
    background-color: #fdfdfd;
}

.english {
    font-size: 28px;
    font-weight: 600;
}

.korean {
    font-size: 32px;
    color: #2c5f8a;
}

img {
    max-width: 320px;
    max-height: 240px;
    border-radius: 6px;
}

#answer {
    margin: 16px 0;
}
"#;

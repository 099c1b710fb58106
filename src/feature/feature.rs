use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::{
    PhaseType,
    ScoreType,
    SmallStr,
};
use crate::data_structs::{
    FeatureKind,
    FeatureLevel,
    Span,
    Strand,
};
use crate::error::{
    AnnotreeError,
    Result,
};
use crate::feature::ident::{
    make_unique_name,
    FeatureAny,
    ParentPath,
};
use crate::style::FeatureStyle;
use crate::with_field_fn;

/// One gapped sub-alignment of a homology hit: a reference sub-range mapped
/// onto a query sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignBlock {
    pub reference: Span,
    pub query:     Span,
}

/// Payload of a transcript feature, populated incrementally as exon and
/// intron records arrive from the stream parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranscriptData {
    pub exons:           Vec<Span>,
    pub introns:         Vec<Span>,
    pub cds:             Option<Span>,
    pub start_not_found: bool,
    pub end_not_found:   bool,
}

/// Payload of a homology (gapped alignment) feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HomologyData {
    pub blocks:       Vec<AlignBlock>,
    pub query_span:   Option<Span>,
    pub query_strand: Strand,
    /// Derived: true while the recorded blocks form a single ungapped
    /// mapping. Recomputed on every [`Feature::add_align_block`].
    pub perfect:      bool,
}

/// Type-specific payload, discriminated by [`FeatureKind`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum FeaturePayload {
    #[default]
    None,
    Transcript(TranscriptData),
    Homology(HomologyData),
}

/// A single annotated genomic element.
///
/// Created minimally and populated through the two-phase mutators, because
/// streaming parsers do not have all fields available at once (transcript
/// exons, for instance, arrive as separate records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub(crate) unique_id:   SmallStr,
    pub(crate) original_id: SmallStr,
    pub(crate) parent:      Option<ParentPath>,
    pub(crate) kind:        FeatureKind,
    pub(crate) span:        Span,
    pub(crate) strand:      Strand,
    pub(crate) phase:       Option<PhaseType>,
    pub(crate) score:       Option<ScoreType>,
    pub(crate) style:       Option<Arc<FeatureStyle>>,
    pub(crate) source:      Option<SmallStr>,
    pub(crate) text:        Option<String>,
    pub(crate) url:         Option<String>,
    pub(crate) payload:     FeaturePayload,
}

impl Feature {
    /// Creates a feature of any non-homology kind.
    pub fn new(
        name: &str,
        kind: FeatureKind,
        span: Span,
        strand: Strand,
    ) -> Result<Self> {
        let unique_id = make_unique_name(
            kind,
            name,
            strand,
            span.start(),
            span.end(),
            None,
        )?;
        let payload = match kind {
            FeatureKind::Transcript => {
                FeaturePayload::Transcript(TranscriptData::default())
            },
            FeatureKind::Alignment => {
                FeaturePayload::Homology(HomologyData::default())
            },
            _ => FeaturePayload::None,
        };
        Ok(Self {
            unique_id,
            original_id: SmallStr::from(name.trim()),
            parent: None,
            kind,
            span,
            strand,
            phase: None,
            score: None,
            style: None,
            source: None,
            text: None,
            url: None,
            payload,
        })
    }

    /// Creates a homology feature. The query sub-range participates in the
    /// unique id, so the same hit at a different query position is a
    /// distinct feature.
    pub fn new_homology(
        name: &str,
        span: Span,
        strand: Strand,
        query_span: Span,
        query_strand: Strand,
    ) -> Result<Self> {
        let unique_id = make_unique_name(
            FeatureKind::Alignment,
            name,
            strand,
            span.start(),
            span.end(),
            Some((query_span.start(), query_span.end())),
        )?;
        Ok(Self {
            unique_id,
            original_id: SmallStr::from(name.trim()),
            parent: None,
            kind: FeatureKind::Alignment,
            span,
            strand,
            phase: None,
            score: None,
            style: None,
            source: None,
            text: None,
            url: None,
            payload: FeaturePayload::Homology(HomologyData {
                query_span: Some(query_span),
                query_strand,
                ..HomologyData::default()
            }),
        })
    }

    with_field_fn!(score, Option<ScoreType>);

    with_field_fn!(source, Option<SmallStr>);

    with_field_fn!(text, Option<String>);

    with_field_fn!(url, Option<String>);

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn phase(&self) -> Option<PhaseType> {
        self.phase
    }

    pub fn score(&self) -> Option<ScoreType> {
        self.score
    }

    pub fn style(&self) -> Option<&Arc<FeatureStyle>> {
        self.style.as_ref()
    }

    pub fn source(&self) -> Option<&SmallStr> {
        self.source.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn payload(&self) -> &FeaturePayload {
        &self.payload
    }

    pub fn set_phase(
        &mut self,
        phase: PhaseType,
    ) -> Result<()> {
        if phase > 2 {
            return Err(AnnotreeError::InvalidPhase(phase));
        }
        self.phase = Some(phase);
        Ok(())
    }

    pub fn set_style(
        &mut self,
        style: Arc<FeatureStyle>,
    ) {
        self.style = Some(style);
    }

    pub fn transcript(&self) -> Option<&TranscriptData> {
        match &self.payload {
            FeaturePayload::Transcript(data) => Some(data),
            _ => None,
        }
    }

    pub fn homology(&self) -> Option<&HomologyData> {
        match &self.payload {
            FeaturePayload::Homology(data) => Some(data),
            _ => None,
        }
    }

    /// Appends one exon span. Exons are kept in arrival order.
    pub fn add_exon(
        &mut self,
        exon: Span,
    ) -> Result<()> {
        self.transcript_mut()?.exons.push(exon);
        Ok(())
    }

    /// Appends one intron span.
    pub fn add_intron(
        &mut self,
        intron: Span,
    ) -> Result<()> {
        self.transcript_mut()?.introns.push(intron);
        Ok(())
    }

    pub fn set_cds(
        &mut self,
        cds: Span,
    ) -> Result<()> {
        self.transcript_mut()?.cds = Some(cds);
        Ok(())
    }

    pub fn set_start_not_found(
        &mut self,
        value: bool,
    ) -> Result<()> {
        self.transcript_mut()?.start_not_found = value;
        Ok(())
    }

    pub fn set_end_not_found(
        &mut self,
        value: bool,
    ) -> Result<()> {
        self.transcript_mut()?.end_not_found = value;
        Ok(())
    }

    /// Appends one gapped sub-alignment and re-derives the
    /// perfect-alignment flag.
    pub fn add_align_block(
        &mut self,
        block: AlignBlock,
    ) -> Result<()> {
        let data = self.homology_mut()?;
        data.blocks.push(block);
        data.perfect = Self::is_perfect(&data.blocks);
        Ok(())
    }

    fn transcript_mut(&mut self) -> Result<&mut TranscriptData> {
        let kind = self.kind;
        match &mut self.payload {
            FeaturePayload::Transcript(data) => Ok(data),
            _ => {
                Err(AnnotreeError::KindMismatch {
                    expected: FeatureKind::Transcript,
                    found:    kind,
                })
            },
        }
    }

    fn homology_mut(&mut self) -> Result<&mut HomologyData> {
        let kind = self.kind;
        match &mut self.payload {
            FeaturePayload::Homology(data) => Ok(data),
            _ => {
                Err(AnnotreeError::KindMismatch {
                    expected: FeatureKind::Alignment,
                    found:    kind,
                })
            },
        }
    }

    /// A mapping is perfect while every block maps 1:1 and consecutive
    /// blocks are contiguous on both the reference and the query.
    fn is_perfect(blocks: &[AlignBlock]) -> bool {
        blocks
            .iter()
            .all(|b| b.reference.length() == b.query.length())
            && blocks.windows(2).all(|pair| {
                pair[0].reference.abuts(&pair[1].reference)
                    && pair[0].query.abuts(&pair[1].query)
            })
    }
}

impl FeatureAny for Feature {
    fn level(&self) -> FeatureLevel {
        FeatureLevel::Feature
    }

    fn unique_id(&self) -> &SmallStr {
        &self.unique_id
    }

    fn original_id(&self) -> &SmallStr {
        &self.original_id
    }

    fn parent(&self) -> Option<&ParentPath> {
        self.parent.as_ref()
    }
}

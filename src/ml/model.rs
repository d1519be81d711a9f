// ============================================================
// Layer 5 — DistilBERT Question-Answering Model
// ============================================================
// A DistilBERT encoder with a span-prediction head, laid out so
// that Hugging Face checkpoints load with a few key renames:
//
//   distilbert.embeddings.word_embeddings      → embeddings.word_embeddings
//   distilbert.embeddings.LayerNorm            → embeddings.layer_norm
//   distilbert.transformer.layer.{i}.attention → layers.{i}.attention
//   qa_outputs                                 → qa_outputs
//
// Each of the n_layers blocks is post-norm:
//
//   x = LayerNorm(x + SelfAttention(x))
//   x = LayerNorm(x + Linear(GELU(Linear(x))))
//
// The head projects every token to two logits: "answer starts
// here" and "answer ends here".
//
// Reference: Sanh et al. (2019) DistilBERT
//            Devlin et al. (2019) BERT §4.2 (SQuAD)

use burn::{
    nn::{
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{gelu, softmax},
};

// Field names match the keys of a Hugging Face DistilBERT
// config.json, so the file deserializes straight into this type.
#[derive(Config, Debug)]
pub struct DistilBertQaConfig {
    pub vocab_size:              usize,
    pub max_position_embeddings: usize,
    pub dim:                     usize,
    pub n_layers:                usize,
    pub n_heads:                 usize,
    pub hidden_dim:              usize,
    #[config(default = 1e-12)]
    pub layer_norm_eps:          f64,
}

impl DistilBertQaConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DistilBertQa<B> {
        let embeddings = Embeddings {
            word_embeddings:     EmbeddingConfig::new(self.vocab_size, self.dim).init(device),
            position_embeddings: EmbeddingConfig::new(self.max_position_embeddings, self.dim).init(device),
            layer_norm:          self.layer_norm(device),
        };
        let layers: Vec<TransformerBlock<B>> = (0..self.n_layers)
            .map(|_| self.build_block(device))
            .collect();
        let qa_outputs = LinearConfig::new(self.dim, 2).init(device);
        DistilBertQa { embeddings, layers, qa_outputs }
    }

    fn build_block<B: Backend>(&self, device: &B::Device) -> TransformerBlock<B> {
        let attention = SelfAttention {
            q_lin:   LinearConfig::new(self.dim, self.dim).init(device),
            k_lin:   LinearConfig::new(self.dim, self.dim).init(device),
            v_lin:   LinearConfig::new(self.dim, self.dim).init(device),
            out_lin: LinearConfig::new(self.dim, self.dim).init(device),
            n_heads: self.n_heads,
        };
        let ffn = FeedForward {
            lin1: LinearConfig::new(self.dim, self.hidden_dim).init(device),
            lin2: LinearConfig::new(self.hidden_dim, self.dim).init(device),
        };
        TransformerBlock {
            attention,
            sa_layer_norm:     self.layer_norm(device),
            ffn,
            output_layer_norm: self.layer_norm(device),
        }
    }

    fn layer_norm<B: Backend>(&self, device: &B::Device) -> LayerNorm<B> {
        LayerNormConfig::new(self.dim)
            .with_epsilon(self.layer_norm_eps)
            .init(device)
    }
}

#[derive(Module, Debug)]
pub struct Embeddings<B: Backend> {
    pub word_embeddings:     Embedding<B>,
    pub position_embeddings: Embedding<B>,
    pub layer_norm:          LayerNorm<B>,
}

impl<B: Backend> Embeddings<B> {
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &input_ids.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);

        let tok_emb = self.word_embeddings.forward(input_ids);
        let pos_emb = self.position_embeddings.forward(positions);
        self.layer_norm.forward(tok_emb + pos_emb)
    }
}

#[derive(Module, Debug)]
pub struct SelfAttention<B: Backend> {
    pub q_lin:   Linear<B>,
    pub k_lin:   Linear<B>,
    pub v_lin:   Linear<B>,
    pub out_lin: Linear<B>,
    pub n_heads: usize,
}

impl<B: Backend> SelfAttention<B> {
    /// x: [batch, seq_len, dim], padding: [batch, 1, 1, seq_len]
    /// (true where the key position is padding)
    pub fn forward(&self, x: Tensor<B, 3>, padding: Tensor<B, 4, Bool>) -> Tensor<B, 3> {
        let [batch_size, seq_len, dim] = x.dims();
        let head_dim = dim / self.n_heads;

        // [batch, seq, dim] → [batch, heads, seq, head_dim]
        let split_heads = |t: Tensor<B, 3>| {
            t.reshape([batch_size, seq_len, self.n_heads, head_dim])
                .swap_dims(1, 2)
        };

        let q = split_heads(self.q_lin.forward(x.clone())) / (head_dim as f64).sqrt();
        let k = split_heads(self.k_lin.forward(x.clone()));
        let v = split_heads(self.v_lin.forward(x));

        let scores = q.matmul(k.swap_dims(2, 3)); // [batch, heads, seq, seq]
        let scores = scores.mask_fill(
            padding.expand([batch_size, self.n_heads, seq_len, seq_len]),
            f32::MIN,
        );
        let weights = softmax(scores, 3);

        let context = weights
            .matmul(v)
            .swap_dims(1, 2)
            .reshape([batch_size, seq_len, dim]);
        self.out_lin.forward(context)
    }
}

#[derive(Module, Debug)]
pub struct FeedForward<B: Backend> {
    pub lin1: Linear<B>,
    pub lin2: Linear<B>,
}

impl<B: Backend> FeedForward<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        self.lin2.forward(gelu(self.lin1.forward(x)))
    }
}

#[derive(Module, Debug)]
pub struct TransformerBlock<B: Backend> {
    pub attention:         SelfAttention<B>,
    pub sa_layer_norm:     LayerNorm<B>,
    pub ffn:               FeedForward<B>,
    pub output_layer_norm: LayerNorm<B>,
}

impl<B: Backend> TransformerBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>, padding: Tensor<B, 4, Bool>) -> Tensor<B, 3> {
        let attn_output = self.attention.forward(x.clone(), padding);
        let x = self.sa_layer_norm.forward(x + attn_output);
        let ffn_output = self.ffn.forward(x.clone());
        self.output_layer_norm.forward(x + ffn_output)
    }
}

#[derive(Module, Debug)]
pub struct DistilBertQa<B: Backend> {
    pub embeddings: Embeddings<B>,
    pub layers:     Vec<TransformerBlock<B>>,
    pub qa_outputs: Linear<B>,
}

pub struct QaModelOutput<B: Backend> {
    pub start_logits: Tensor<B, 2>,
    pub end_logits:   Tensor<B, 2>,
}

impl<B: Backend> DistilBertQa<B> {
    /// input_ids, attention_mask: [batch, seq_len]
    /// → start_logits, end_logits: [batch, seq_len]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> QaModelOutput<B> {
        let [batch_size, seq_len] = input_ids.dims();

        let padding = attention_mask
            .equal_elem(0)
            .reshape([batch_size, 1, 1, seq_len]);

        let mut x = self.embeddings.forward(input_ids);
        for layer in &self.layers {
            x = layer.forward(x, padding.clone());
        }

        // Project to 2 logits per token then split into start / end.
        let logits = self.qa_outputs.forward(x); // [batch, seq_len, 2]
        let start_logits = logits.clone()
            .slice([0..batch_size, 0..seq_len, 0..1])
            .reshape([batch_size, seq_len]);
        let end_logits = logits
            .slice([0..batch_size, 0..seq_len, 1..2])
            .reshape([batch_size, seq_len]);

        QaModelOutput { start_logits, end_logits }
    }
}
